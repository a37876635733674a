use std::time::Duration;

use clap::Parser;
use compare_core::DEFAULT_SEARCH_TIMEOUT_SECS;
use compare_engine::SearchSettings;

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "price-compare")]
#[command(about = "Compare a product's price across Amazon, Flipkart and Myntra")]
pub struct Cli {
    /// Product names to search; read line by line from stdin when omitted.
    pub products: Vec<String>,

    /// Base URL of the search backend.
    #[arg(long, env = "PRICE_COMPARE_BACKEND", default_value = "http://localhost:5000")]
    pub backend: String,

    /// Give up on a search after this many seconds.
    #[arg(long, default_value_t = DEFAULT_SEARCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Probe the backend health endpoint and exit.
    #[arg(long)]
    pub health: bool,
}

impl Cli {
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint: self.backend.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..SearchSettings::default()
        }
    }
}
