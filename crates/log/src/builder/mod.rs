//! Logger builder implementation

mod format;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::{LogError, LogResult};
use crate::writer;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by a successful install
///
/// `installed` is false for the no-op guard handed out by
/// [`init_test`](crate::init_test) when another subscriber already exists.
#[derive(Debug)]
pub struct LoggerGuard {
    installed: bool,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - Writer configuration is invalid
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))?;

        let writer = writer::make_writer(&self.config.writer)?;

        let fmt_layer = format::fmt_layer(&self.config, writer);
        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = ?self.config.format,
            "logger initialized"
        );

        Ok(LoggerGuard { installed: true })
    }
}

impl LoggerGuard {
    pub(crate) const fn noop() -> Self {
        Self { installed: false }
    }

    /// Whether this call installed the global subscriber
    pub const fn installed(&self) -> bool {
        self.installed
    }
}
