//! Layered configuration, lowest first:
//!
//! 1. built-in defaults
//! 2. `POOLKIT_LOG` / `RUST_LOG` as the log filter
//! 3. `poolkit.toml`
//! 4. `POOLKIT_*` environment variables, e.g. `POOLKIT_LOG_LEVEL`
//! 5. command-line flags

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use poolkit_log::Format;
use poolkit_memory::{PoolConfig, ZeroSizePolicy};
use serde::{Deserialize, Serialize};

/// Config file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "poolkit.toml";

/// Environment variable prefix, e.g. `POOLKIT_CAPACITY=8192`
pub const ENV_PREFIX: &str = "POOLKIT_";

/// Effective settings for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pool size in bytes
    pub capacity: usize,
    /// Behaviour of `alloc:0`
    pub zero_size: ZeroSizePolicy,
    /// Descriptor metadata cap as a fraction of capacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_limit: Option<f64>,
    /// Keep allocator counters
    pub track_stats: bool,
    /// Log filter directive
    pub log_level: String,
    /// Log output format
    pub log_format: Format,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            zero_size: ZeroSizePolicy::Reject,
            metadata_limit: None,
            track_stats: true,
            log_level: "warn".to_string(),
            log_format: Format::Compact,
        }
    }
}

/// Flag values layered on top of every other source
///
/// `None` fields leave the lower layers in place.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,
}

impl AppConfig {
    /// Merge every source, highest precedence last
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => {
                bail!("config file {} does not exist", path.display())
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(level) = poolkit_log::Config::env_level() {
            figment = figment.merge(Serialized::default("log_level", level));
        }

        let config: Self = figment
            .merge(Toml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("invalid configuration")?;

        config.pool_config().validate()?;
        if config.capacity == 0 {
            bail!("capacity must be greater than zero");
        }
        Ok(config)
    }

    /// Allocator configuration derived from these settings
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            zero_size: self.zero_size,
            track_stats: self.track_stats,
            metadata_limit: self.metadata_limit,
            ..PoolConfig::default()
        }
    }

    /// Logger configuration
    ///
    /// The filter is the merged `log_level`; display toggles still come
    /// from the environment.
    pub fn log_config(&self) -> poolkit_log::Config {
        poolkit_log::Config {
            format: self.log_format,
            ..poolkit_log::Config::from_env().with_level(self.log_level.clone())
        }
    }

    /// Render as TOML, suitable for a `poolkit.toml`
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration")
    }
}
