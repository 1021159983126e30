pub mod line_writer;
pub mod period;
pub mod timestamp_writer;

pub use line_writer::LineLogWriter;
pub use period::Period;
pub use timestamp_writer::{Clock, TimestampFileWriter, WriteMode};

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::{FieldToolsError, Result};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(settings: &Settings, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = match &settings.log_file {
        Some(path) => {
            let writer = TimestampFileWriter::new(path)
                .with_period(settings.period()?)
                .with_clock(settings.log_clock);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| FieldToolsError::Config(format!("Failed to initialise logging: {}", e)))
}
