use std::collections::BTreeMap;

use serde_json::Value;

use crate::best_deal::{select_best, BestDeal, PriceComparison};
use crate::normalize::{echoed_product_name, normalize};
use crate::view_model::{AppViewModel, PlatformRowView};
use crate::{CanonicalResult, Platform, TaskStatus, ValidationError};

/// Monotonic search counter; completions tagged with an older value are stale.
pub type Generation = u64;

/// Upper bound on how long one search may stay in flight, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Transport,
    Timeout,
}

/// Request-level failure reported by whoever carried out the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub cause: FailureCause,
    pub reason: String,
    pub endpoint: String,
}

impl SearchFailure {
    /// Text shown to the user; timeouts and transport errors read the same.
    pub fn user_message(&self) -> String {
        format!(
            "Error: {} - Backend at {} may not be running",
            self.reason, self.endpoint
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: String,
    query: Option<String>,
    echoed_name: Option<String>,
    phase: Phase,
    generation: Generation,
    result: CanonicalResult,
    reported: usize,
    statuses: BTreeMap<Platform, TaskStatus>,
    best: Option<BestDeal>,
    last_error: Option<String>,
    failure: Option<FailureCause>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn result(&self) -> &CanonicalResult {
        &self.result
    }

    pub fn best_deal(&self) -> Option<BestDeal> {
        self.best
    }

    /// Returns true once after any visible change, then resets.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let platforms = Platform::ALL
            .into_iter()
            .map(|platform| PlatformRowView {
                platform,
                price: self.result.price(platform),
                status: self.statuses.get(&platform).copied(),
                is_lowest: self.best.is_some_and(|deal| deal.platform == platform),
                error: self.result.error(platform).map(ToOwned::to_owned),
            })
            .collect();

        let comparison =
            (self.phase == Phase::Succeeded).then(|| PriceComparison::from_result(&self.result));

        AppViewModel {
            input: self.input.clone(),
            query: self.query.clone(),
            echoed_name: self.echoed_name.clone(),
            phase: self.phase,
            generation: self.generation,
            platforms,
            best_deal: self.best,
            comparison,
            reported: self.reported,
            last_error: self.last_error.clone(),
            failure: self.failure,
            dirty: self.dirty,
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Completions for anything but the in-flight generation are stale.
    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.phase == Phase::Searching && generation == self.generation
    }

    /// Starts a new search from the current input, discarding all results of
    /// the previous one. Returns the generation and trimmed query to issue.
    pub(crate) fn begin_search(&mut self) -> Result<(Generation, String), ValidationError> {
        let query = self.input.trim();
        if query.is_empty() {
            return Err(ValidationError::BlankQuery);
        }
        let query = query.to_string();

        self.generation += 1;
        self.phase = Phase::Searching;
        self.query = Some(query.clone());
        self.echoed_name = None;
        self.result = CanonicalResult::new();
        self.reported = 0;
        self.best = None;
        self.last_error = None;
        self.failure = None;
        self.statuses = Platform::ALL
            .into_iter()
            .map(|platform| (platform, TaskStatus::Pending))
            .collect();
        self.mark_dirty();

        Ok((self.generation, query))
    }

    pub(crate) fn reject(&mut self, err: ValidationError) {
        self.last_error = Some(err.to_string());
        self.mark_dirty();
    }

    pub(crate) fn mark_running(&mut self) {
        for status in self.statuses.values_mut() {
            if *status == TaskStatus::Pending {
                *status = TaskStatus::Running;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_response(&mut self, payload: &Value) {
        let mut result = normalize(payload);
        self.reported = result.len();
        result.fill_missing();

        self.statuses = Platform::ALL
            .into_iter()
            .map(|platform| {
                let status = result.status(platform).unwrap_or(TaskStatus::Completed);
                (platform, status)
            })
            .collect();
        self.best = select_best(&result);
        self.echoed_name = echoed_product_name(payload).map(ToOwned::to_owned);
        self.result = result;
        self.last_error = None;
        self.phase = Phase::Succeeded;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, failure: &SearchFailure) {
        let status = match failure.cause {
            FailureCause::Timeout => TaskStatus::Timeout,
            FailureCause::Transport => TaskStatus::Failed,
        };
        for value in self.statuses.values_mut() {
            *value = status;
        }
        self.last_error = Some(failure.user_message());
        self.failure = Some(failure.cause);
        self.phase = Phase::Failed;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
