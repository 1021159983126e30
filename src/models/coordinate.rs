use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::CoordinateError;
use crate::utils::constants::{
    MAX_DEGREES, MAX_MINUTES, MAX_SECONDS, MINUTES_PER_DEGREE, MIN_DECIMAL_DEGREES,
};
use crate::utils::coordinates::{match_dms, DmsFields};

/// A latitude or longitude held as signed decimal degrees.
///
/// Values are validated when they are built, so a `Dms` that exists is always
/// in range. Parsing a new string produces a new value; nothing is mutated.
///
/// # Examples
/// ```
/// use fieldtools::models::Dms;
///
/// let lat: Dms = "45 30 15.5 N".parse().unwrap();
/// assert!((lat.decimal_degrees() - 45.504305).abs() < 0.000001);
///
/// let lon = Dms::parse("-45° 30' 15\"").unwrap();
/// assert!(lon.is_negative());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "DmsInput", into = "f64")]
pub struct Dms {
    decimal: f64,
}

/// Accepted serialized forms: a DMS string or a plain decimal number.
#[derive(Deserialize)]
#[serde(untagged)]
enum DmsInput {
    Decimal(f64),
    Text(String),
}

impl Dms {
    /// Parse a loosely formatted coordinate string.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let trimmed = input.trim();
        match match_dms(trimmed) {
            Some((pattern, fields)) => {
                debug!(input = trimmed, pattern, "matched DMS layout");
                Self::from_fields(fields)
            }
            None => Err(CoordinateError::Format {
                input: trimmed.to_string(),
            }),
        }
    }

    /// Resolve the sign of captured components and check their ranges.
    pub fn from_fields(fields: DmsFields) -> Result<Self, CoordinateError> {
        let value = fields.signed_value();
        let minutes = fields.minutes as f64;

        let in_range = (0.0..MAX_DEGREES).contains(&fields.degrees)
            && (0.0..MAX_MINUTES).contains(&minutes)
            && (0.0..MAX_SECONDS).contains(&fields.seconds)
            && value >= MIN_DECIMAL_DEGREES;

        if !in_range {
            return Err(CoordinateError::Range {
                degrees: fields.degrees,
                minutes,
                seconds: fields.seconds,
                value,
            });
        }

        Ok(Self { decimal: value })
    }

    /// Build from a decimal value using the same bounds as parsing.
    pub fn from_decimal(value: f64) -> Result<Self, CoordinateError> {
        if value.is_finite() && value.abs() < MAX_DEGREES && value >= MIN_DECIMAL_DEGREES {
            Ok(Self { decimal: value })
        } else {
            Err(CoordinateError::Range {
                degrees: value.abs().trunc(),
                minutes: 0.0,
                seconds: 0.0,
                value,
            })
        }
    }

    pub fn decimal_degrees(&self) -> f64 {
        self.decimal
    }

    pub fn is_negative(&self) -> bool {
        self.decimal < 0.0
    }

    /// Project the stored value onto (degrees, minutes, seconds).
    ///
    /// Every term truncates toward zero, so a negative coordinate yields
    /// non-positive terms, e.g. -45.5 gives (-45, -30, 0.0).
    pub fn to_triple(&self) -> (i64, i64, f64) {
        triple(self.decimal)
    }

    /// Sign flag plus the triple of the absolute value.
    pub fn to_unsigned_triple(&self) -> (bool, u64, u64, f64) {
        let (d, m, s) = triple(self.decimal.abs());
        (self.is_negative(), d as u64, m as u64, s)
    }
}

fn triple(value: f64) -> (i64, i64, f64) {
    let degrees = value.trunc();
    let fractional_minutes = (value - degrees) * MINUTES_PER_DEGREE;
    let minutes = fractional_minutes.trunc();
    let seconds = (fractional_minutes - minutes) * 60.0;
    (degrees as i64, minutes as i64, seconds)
}

impl FromStr for Dms {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dms::parse(s)
    }
}

impl TryFrom<&str> for Dms {
    type Error = CoordinateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Dms::parse(value)
    }
}

impl TryFrom<String> for Dms {
    type Error = CoordinateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Dms::parse(&value)
    }
}

impl TryFrom<DmsInput> for Dms {
    type Error = CoordinateError;

    fn try_from(value: DmsInput) -> Result<Self, Self::Error> {
        match value {
            DmsInput::Decimal(d) => Dms::from_decimal(d),
            DmsInput::Text(s) => Dms::parse(&s),
        }
    }
}

impl From<Dms> for f64 {
    fn from(value: Dms) -> Self {
        value.decimal
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.decimal, f)
    }
}
