//! Tracing subscriber bootstrap for bookshelf binaries.

use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `settings.log_filter`. Calling this more
/// than once is harmless: later calls leave the first subscriber in place.
pub fn init(settings: &TelemetrySettings) {
    let filter = env_filter(settings);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            target: "bookshelf-telemetry",
            format = ?settings.log_format,
            "tracing subscriber installed"
        );
    }
}

fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
