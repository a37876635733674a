use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ParsedPrice, Platform};

/// Lifecycle of one platform within a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Timeout,
}

/// Reconciled per-platform outcome of one search response.
///
/// Keyed by [`Platform`], so iteration always follows the fixed enumeration
/// order no matter how the backend ordered its keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalResult {
    prices: BTreeMap<Platform, ParsedPrice>,
    statuses: BTreeMap<Platform, TaskStatus>,
    errors: BTreeMap<Platform, String>,
}

impl CanonicalResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a platform whose price is known (numeric or unavailable).
    pub fn record_price(&mut self, platform: Platform, price: ParsedPrice) {
        self.prices.insert(platform, price);
        self.statuses.insert(platform, TaskStatus::Completed);
        self.errors.remove(&platform);
    }

    /// Record a platform the backend reported as failed or timed out.
    pub fn record_failure(&mut self, platform: Platform, status: TaskStatus, message: String) {
        self.prices.insert(platform, ParsedPrice::Unavailable);
        self.statuses.insert(platform, status);
        self.errors.insert(platform, message);
    }

    /// Give every platform the payload omitted an unavailable, completed entry.
    pub fn fill_missing(&mut self) {
        for platform in Platform::ALL {
            if !self.prices.contains_key(&platform) {
                self.record_price(platform, ParsedPrice::Unavailable);
            }
        }
    }

    pub fn price(&self, platform: Platform) -> Option<ParsedPrice> {
        self.prices.get(&platform).copied()
    }

    pub fn status(&self, platform: Platform) -> Option<TaskStatus> {
        self.statuses.get(&platform).copied()
    }

    pub fn error(&self, platform: Platform) -> Option<&str> {
        self.errors.get(&platform).map(String::as_str)
    }

    pub fn prices(&self) -> impl Iterator<Item = (Platform, ParsedPrice)> + '_ {
        self.prices.iter().map(|(platform, price)| (*platform, *price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(Platform, ParsedPrice)> for CanonicalResult {
    fn from_iter<I: IntoIterator<Item = (Platform, ParsedPrice)>>(iter: I) -> Self {
        let mut result = CanonicalResult::new();
        for (platform, price) in iter {
            result.record_price(platform, price);
        }
        result
    }
}
