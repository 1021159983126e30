use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;
use crate::models::Dms;

/// Outcome of converting one input line to decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub line: usize,
    pub input: String,
    pub decimal: Option<f64>,
    pub degrees: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<f64>,
    pub error: Option<String>,
}

impl ConversionRecord {
    pub fn from_result(line: usize, input: &str, result: &Result<Dms, CoordinateError>) -> Self {
        match result {
            Ok(dms) => {
                let (degrees, minutes, seconds) = dms.to_triple();
                Self {
                    line,
                    input: input.to_string(),
                    decimal: Some(dms.decimal_degrees()),
                    degrees: Some(degrees),
                    minutes: Some(minutes),
                    seconds: Some(seconds),
                    error: None,
                }
            }
            Err(e) => Self {
                line,
                input: input.to_string(),
                decimal: None,
                degrees: None,
                minutes: None,
                seconds: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_success() {
        let record = ConversionRecord::from_result(3, "10 30 00 W", &Dms::parse("10 30 00 W"));
        assert!(record.is_ok());
        assert_eq!(record.line, 3);
        assert_eq!(record.decimal, Some(-10.5));
        assert_eq!(record.degrees, Some(-10));
        assert_eq!(record.minutes, Some(-30));
    }

    #[test]
    fn test_from_failure() {
        let record = ConversionRecord::from_result(1, "junk", &Dms::parse("junk"));
        assert!(!record.is_ok());
        assert_eq!(record.decimal, None);
        assert!(record.error.unwrap().contains("junk"));
    }
}
