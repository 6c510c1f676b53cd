//! Pool allocator configuration

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, MemoryResult};

/// What `alloc(0)` does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroSizePolicy {
    /// Fail with [`MemoryError::ZeroSizedRequest`]
    #[default]
    Reject,
    /// Return the first free block's location without reserving it.
    ///
    /// The caller does not own the returned region and must not write
    /// through it.
    Peek,
}

/// Configuration for pool allocator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Behaviour of zero-sized requests
    pub zero_size: ZeroSizePolicy,

    /// Enable statistics tracking
    pub track_stats: bool,

    /// Fill pattern byte for newly allocated memory (for debugging)
    pub alloc_pattern: Option<u8>,
    /// Fill pattern byte for freed memory (for debugging)
    pub free_pattern: Option<u8>,

    /// Cap on descriptor metadata, as a fraction of pool capacity
    pub metadata_limit: Option<f64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            zero_size: ZeroSizePolicy::Reject,
            track_stats: cfg!(debug_assertions),
            alloc_pattern: if cfg!(debug_assertions) {
                Some(0xBB)
            } else {
                None
            },
            free_pattern: if cfg!(debug_assertions) {
                Some(0xDD)
            } else {
                None
            },
            metadata_limit: None,
        }
    }
}

impl PoolConfig {
    /// Production configuration - optimized for performance
    #[must_use]
    pub fn production() -> Self {
        Self {
            zero_size: ZeroSizePolicy::Reject,
            track_stats: false,
            alloc_pattern: None,
            free_pattern: None,
            metadata_limit: None,
        }
    }

    /// Debug configuration - optimized for debugging
    #[must_use]
    pub fn debug() -> Self {
        Self {
            zero_size: ZeroSizePolicy::Reject,
            track_stats: true,
            alloc_pattern: Some(0xBB),
            free_pattern: Some(0xDD),
            metadata_limit: None,
        }
    }

    /// Legacy behaviour: `alloc(0)` peeks at the first free block
    #[must_use]
    pub fn compat() -> Self {
        Self {
            zero_size: ZeroSizePolicy::Peek,
            ..Self::production()
        }
    }

    /// Set the zero-size policy
    #[must_use = "builder methods must be chained or built"]
    pub fn with_zero_size(mut self, policy: ZeroSizePolicy) -> Self {
        self.zero_size = policy;
        self
    }

    /// Set the metadata limit
    #[must_use = "builder methods must be chained or built"]
    pub fn with_metadata_limit(mut self, limit: f64) -> Self {
        self.metadata_limit = Some(limit);
        self
    }

    /// Check the configuration for values the allocator cannot honour
    pub fn validate(&self) -> MemoryResult<()> {
        if let Some(limit) = self.metadata_limit {
            // also rejects NaN
            let in_range = limit > 0.0 && limit <= 1.0;
            if !in_range {
                return Err(MemoryError::invalid_config(format!(
                    "metadata limit must be in (0, 1], got {limit}"
                )));
            }
        }
        Ok(())
    }
}
