use crate::{CanonicalResult, Platform};

/// Lowest numeric price across platforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestDeal {
    pub platform: Platform,
    pub price: f64,
}

/// Pick the platform with the strictly lowest numeric price.
///
/// Platforms are scanned in [`Platform::ALL`] order and only a strictly
/// smaller price replaces the current pick, so ties go to the earliest
/// platform. Returns `None` when no platform has a numeric price.
pub fn select_best(canonical: &CanonicalResult) -> Option<BestDeal> {
    let mut best: Option<BestDeal> = None;
    for platform in Platform::ALL {
        let Some(price) = canonical.price(platform).and_then(|p| p.amount()) else {
            continue;
        };
        match best {
            Some(current) if current.price <= price => {}
            _ => best = Some(BestDeal { platform, price }),
        }
    }
    best
}

/// Summary of how far apart the valid prices are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceComparison {
    pub valid_count: usize,
    pub best: Option<BestDeal>,
    pub highest: Option<f64>,
}

impl PriceComparison {
    pub fn from_result(canonical: &CanonicalResult) -> Self {
        let amounts: Vec<f64> = canonical.prices().filter_map(|(_, p)| p.amount()).collect();
        let highest = amounts.iter().copied().reduce(f64::max);
        Self {
            valid_count: amounts.len(),
            best: select_best(canonical),
            highest,
        }
    }

    /// Difference between the highest and the lowest price, once at least
    /// two platforms could be compared.
    pub fn savings(&self) -> Option<f64> {
        if self.valid_count < 2 {
            return None;
        }
        match (self.highest, self.best) {
            (Some(highest), Some(best)) => Some(highest - best.price),
            _ => None,
        }
    }
}
