use serde::Serialize;
use std::fmt;

/// A text value narrowed to the most specific scalar it can represent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Interpret `value` as an integer, then a float, falling back to the text.
pub fn coerce(value: &str) -> Scalar {
    let trimmed = value.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        Scalar::Integer(i)
    } else if let Ok(f) = trimmed.parse::<f64>() {
        Scalar::Float(f)
    } else {
        Scalar::Text(value.to_string())
    }
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        coerce(value)
    }
}
