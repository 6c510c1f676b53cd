//! Writer implementations

use std::io;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::config::WriterConfig;
use crate::error::{LogError, LogResult};

/// Create a writer from configuration
pub(crate) fn make_writer(config: &WriterConfig) -> LogResult<BoxMakeWriter> {
    let writer = match config {
        WriterConfig::Stderr => BoxMakeWriter::new(io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(io::stdout),
        WriterConfig::Multi(writers) => {
            let mut rest = writers.iter();
            let first = rest
                .next()
                .ok_or_else(|| LogError::config("Multi writer needs at least one writer"))?;
            let mut combined = make_writer(first)?;
            for next in rest {
                combined = BoxMakeWriter::new(combined.and(make_writer(next)?));
            }
            combined
        }
    };

    Ok(writer)
}
