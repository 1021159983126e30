use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::FieldToolsError;
use crate::utils::constants::{
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_YEAR,
};

/// How often a timestamped log file rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Period {
    Minute,
    Hour,
    Day,
    Month,
    Year,
    Seconds(u64),
}

const FORMAT_PIECES: [&str; 5] = ["%Y", "-%m-%d", " %H", "-%M", "-%S"];
const INTERVALS: [u64; 5] = [
    SECONDS_PER_YEAR,
    SECONDS_PER_DAY,
    SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
    1,
];

impl Period {
    /// Length in seconds. Months have no fixed length.
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Period::Minute => Some(SECONDS_PER_MINUTE),
            Period::Hour => Some(SECONDS_PER_HOUR),
            Period::Day => Some(SECONDS_PER_DAY),
            Period::Month => None,
            Period::Year => Some(SECONDS_PER_YEAR),
            Period::Seconds(n) => Some(*n),
        }
    }

    /// strftime format precise enough to tell periods apart, and no more.
    ///
    /// ```
    /// use fieldtools::logging::Period;
    ///
    /// assert_eq!(Period::Month.date_format(), "%Y-%m");
    /// assert_eq!(Period::Hour.date_format(), "%Y-%m-%d %H");
    /// assert_eq!(Period::Seconds(3600).date_format(), Period::Hour.date_format());
    /// ```
    pub fn date_format(&self) -> String {
        let secs = match self.seconds() {
            Some(secs) => secs,
            None => return "%Y-%m".to_string(),
        };
        let end = INTERVALS
            .iter()
            .position(|interval| secs % interval == 0)
            .unwrap_or(INTERVALS.len() - 1);
        FORMAT_PIECES[..=end].concat()
    }
}

impl FromStr for Period {
    type Err = FieldToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "minute" => Ok(Period::Minute),
            "hour" => Ok(Period::Hour),
            "day" => Ok(Period::Day),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => match other.parse::<u64>() {
                Ok(n) if n > 0 => Ok(Period::Seconds(n)),
                _ => Err(FieldToolsError::InvalidPeriod(format!(
                    "'{}' is not one of minute, hour, day, month, year or a positive number of seconds",
                    s
                ))),
            },
        }
    }
}

impl TryFrom<String> for Period {
    type Error = FieldToolsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Minute => f.write_str("minute"),
            Period::Hour => f.write_str("hour"),
            Period::Day => f.write_str("day"),
            Period::Month => f.write_str("month"),
            Period::Year => f.write_str("year"),
            Period::Seconds(n) => write!(f, "{}", n),
        }
    }
}
