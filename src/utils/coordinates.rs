use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::utils::constants::{MINUTES_PER_DEGREE, SECONDS_PER_DEGREE};

/// Trailing directional indicator of a coordinate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and west count towards a negative coordinate.
    pub fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Components captured from a coordinate string by one of the layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsFields {
    pub negative: bool,
    pub degrees: f64,
    pub minutes: u64,
    pub seconds: f64,
    pub hemisphere: Option<Hemisphere>,
}

impl DmsFields {
    /// Unsigned sum of the components in decimal degrees.
    pub fn magnitude(&self) -> f64 {
        self.degrees + self.minutes as f64 / MINUTES_PER_DEGREE + self.seconds / SECONDS_PER_DEGREE
    }

    /// Leading minus and a south/west hemisphere cancel each other out.
    pub fn is_negative(&self) -> bool {
        self.negative ^ self.hemisphere.map_or(false, |h| h.is_negative())
    }

    pub fn signed_value(&self) -> f64 {
        if self.is_negative() {
            -self.magnitude()
        } else {
            self.magnitude()
        }
    }
}

/// A named textual layout for DMS strings.
pub struct DmsPattern {
    name: &'static str,
    regex: Regex,
}

impl DmsPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("DMS pattern '{}' failed to compile: {}", name, e));
        Self { name, regex }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match the whole of `input` against this layout.
    pub fn match_fields(&self, input: &str) -> Option<DmsFields> {
        let caps = self.regex.captures(input)?;

        let degrees = caps.name("deg")?.as_str().parse::<f64>().ok()?;
        let minutes = match caps.name("min") {
            // digits only; saturate so oversized values fail range checks
            Some(m) => m.as_str().parse::<u64>().unwrap_or(u64::MAX),
            None => 0,
        };
        let seconds = match caps.name("sec") {
            Some(s) => s.as_str().parse::<f64>().ok()?,
            None => 0.0,
        };

        Some(DmsFields {
            negative: caps.name("neg").is_some(),
            degrees,
            minutes,
            seconds,
            hemisphere: hemisphere(&caps)?,
        })
    }
}

/// `None` when a captured letter is not a hemisphere, `Some(None)` when absent.
fn hemisphere(caps: &Captures<'_>) -> Option<Option<Hemisphere>> {
    match caps.name("hemi") {
        Some(m) => m.as_str().chars().next().and_then(Hemisphere::from_char).map(Some),
        None => Some(None),
    }
}

lazy_static! {
    /// Layouts in priority order. The first one matching the whole input wins.
    static ref DMS_PATTERNS: Vec<DmsPattern> = vec![
        // Digits bunched together, two digits each for minutes and seconds.
        DmsPattern::new(
            "compact",
            r"(?i)^(?P<neg>-)?(?P<deg>[0-9]+)(?P<min>[0-9]{2})(?P<sec>[0-9]{2})\s*(?P<hemi>(?-u:[NSEW]))?$",
        ),
        // Exactly four digits read as DDMM, so "1000" is 10°00' rather than 1000°.
        DmsPattern::new(
            "compact-dm",
            r"(?i)^(?P<neg>-)?(?P<deg>[1-9][0-9])(?P<min>[0-9]{2})\s*(?P<hemi>(?-u:[NSEW]))?$",
        ),
        // Everything else: symbols, words, commas or spaces between components.
        // Hemisphere letters fold case in ASCII only.
        DmsPattern::new(
            "lenient",
            concat!(
                r"(?i)^(?P<neg>-)?",
                r"(?P<deg>[0-9]+(?:\.[0-9]+)?)\s*(?:°|deg)?",
                r"(?:",
                r"\s*?[, ]?\s*(?P<min>[0-9]+)\s*(?:'|min)?",
                r#"\s*?[, ]?\s*(?P<sec>[0-9]+(?:\.[0-9]+)?)\s*(?:"|sec)?"#,
                r")?",
                r"\s*(?P<hemi>(?-u:[NSEW]))?$",
            ),
        ),
    ];
}

/// Patterns in the order they are tried.
pub fn dms_patterns() -> &'static [DmsPattern] {
    &DMS_PATTERNS
}

/// Try each layout in priority order against the trimmed input.
pub fn match_dms(input: &str) -> Option<(&'static str, DmsFields)> {
    let trimmed = input.trim();
    dms_patterns()
        .iter()
        .find_map(|pattern| pattern.match_fields(trimmed).map(|f| (pattern.name(), f)))
}
