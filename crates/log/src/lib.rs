//! # poolkit-log
//!
//! Zero-config logging for the poolkit crates, built on `tracing`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> poolkit_log::LogResult<()> {
//!     let _guard = poolkit_log::auto_init()?;
//!
//!     poolkit_log::info!(capacity = 1024, "pool ready");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;
mod macros;
mod writer;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{LogResult, auto_init, debug, error, info, init, init_with, trace, warn};
}

/// Auto-detect and initialize the best logging configuration
///
/// `POOLKIT_LOG` or `RUST_LOG` in the environment selects [`Config::from_env`];
/// otherwise debug builds get [`Config::development`] and release builds
/// [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if Config::env_level().is_some() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests
///
/// Safe to call from every test: once a global subscriber exists the call
/// returns a no-op guard instead of failing.
pub fn init_test() -> LogResult<LoggerGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }
    match init_with(Config::test()) {
        Ok(guard) => Ok(guard),
        // another test thread won the race
        Err(LogError::Init(_)) => Ok(LoggerGuard::noop()),
        Err(e) => Err(e),
    }
}
