#![deny(missing_docs)]
//! Shared logging utilities for the price-compare workspace.
//!
//! `compare_debug!`, `compare_info!` and `compare_warn!` forward to the `log`
//! facade re-exported here, so callers need no `log` dependency of their own.

#[doc(hidden)]
pub use log as __log;

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! compare_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! compare_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! compare_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Default verbosity: debug in debug builds, info in release builds.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Routes log output through the test harness so it shows up only for
/// failing tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    let _ = simplelog::TestLogger::init(default_level(), simplelog::Config::default());
}
