use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::Result;
use crate::logging::{Clock, Period};
use crate::utils::constants::{CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_LOG_PERIOD, ENV_PREFIX};

/// Runtime settings, layered from defaults, an optional `fieldtools.toml`
/// (or the file given on the command line) and `FIELDTOOLS_*` variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub log_level: String,

    pub log_file: Option<PathBuf>,

    /// `none` disables the timestamp in log file names.
    pub log_period: String,

    pub log_clock: Clock,

    #[validate(range(min = 1, max = 1024))]
    pub max_workers: usize,

    pub timezone_registry: Option<PathBuf>,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("log_period", DEFAULT_LOG_PERIOD)?
            .set_default("log_clock", "local")?
            .set_default("max_workers", num_cpus::get() as u64)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        settings.period()?;
        Ok(settings)
    }

    /// The configured log period, or `None` for un-stamped file names.
    pub fn period(&self) -> Result<Option<Period>> {
        let raw = self.log_period.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            log_period: DEFAULT_LOG_PERIOD.to_string(),
            log_clock: Clock::Local,
            max_workers: num_cpus::get(),
            timezone_registry: None,
        }
    }
}
