//! Configuration types and builders
//!
//! This module provides configuration types for the logging system, organized into:
//! - `base`: Core configuration structs (Config, Format)
//! - `writer`: Writer and display configuration
//! - `presets`: Pre-configured setups (development, production, test)

mod base;
mod presets;
mod writer;

pub use base::{Config, Format};
pub use writer::{DisplayConfig, WriterConfig};
