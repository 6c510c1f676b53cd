//! Format layer creation

use tracing::Subscriber;
use tracing_subscriber::{Layer, fmt::writer::BoxMakeWriter, registry::LookupSpan};

use crate::config::{Config, Format};

/// Boxed fmt layer, so every format/timestamp combination has the same type
pub(super) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Apply the display options shared by every format and box the result.
///
/// Timestamps change the layer's type, so both arms box separately.
macro_rules! finish_layer {
    ($layer:expr, $display:expr) => {{
        let layer = $layer
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_thread_ids($display.thread_ids);
        if $display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

/// Build the fmt layer described by `config`
pub(super) fn fmt_layer<S>(config: &Config, writer: BoxMakeWriter) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let display = &config.display;
    let base = tracing_subscriber::fmt::layer().with_writer(writer);

    match config.format {
        Format::Pretty => finish_layer!(base.pretty(), display),
        Format::Compact => finish_layer!(base.compact(), display),
        Format::Json => finish_layer!(
            base.json()
                .with_current_span(true)
                .flatten_event(display.flatten),
            display
        ),
    }
}
