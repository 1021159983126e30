/// Coordinate component bounds
pub const MAX_DEGREES: f64 = 360.0;
pub const MAX_MINUTES: f64 = 60.0;
pub const MAX_SECONDS: f64 = 60.0;
pub const MIN_DECIMAL_DEGREES: f64 = -180.0;

/// Sexagesimal conversion factors
pub const MINUTES_PER_DEGREE: f64 = 60.0;
pub const SECONDS_PER_DEGREE: f64 = 3600.0;

/// Period lengths in seconds
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Half a year in days, used to pick the nearest year for a julian day
pub const HALF_YEAR_DAYS: i64 = 365 / 2;

/// Size of the binary timezone information blob
pub const TZI_LEN: usize = 44;

/// Configuration
pub const CONFIG_FILE: &str = "fieldtools";
pub const ENV_PREFIX: &str = "FIELDTOOLS";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_PERIOD: &str = "day";

/// Target used for events forwarded by the line writer
pub const CAPTURE_TARGET: &str = "fieldtools::captured";
