use crate::{
    BestDeal, FailureCause, Generation, ParsedPrice, Phase, Platform, PriceComparison, TaskStatus,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub query: Option<String>,
    pub echoed_name: Option<String>,
    pub phase: Phase,
    pub generation: Generation,
    pub platforms: Vec<PlatformRowView>,
    pub best_deal: Option<BestDeal>,
    /// Present once a search succeeded.
    pub comparison: Option<PriceComparison>,
    /// Platforms the last payload actually mentioned.
    pub reported: usize,
    pub last_error: Option<String>,
    pub failure: Option<FailureCause>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn row(&self, platform: Platform) -> Option<&PlatformRowView> {
        self.platforms.iter().find(|row| row.platform == platform)
    }

    /// Prices came back but none of them could be compared.
    pub fn comparison_unavailable(&self) -> bool {
        self.phase == Phase::Succeeded
            && self.best_deal.is_none()
            && self.reported > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRowView {
    pub platform: Platform,
    pub price: Option<ParsedPrice>,
    pub status: Option<TaskStatus>,
    pub is_lowest: bool,
    pub error: Option<String>,
}
