use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldToolsError, Result};
use crate::utils::constants::TZI_LEN;

/// A transition rule as stored in a registry SYSTEMTIME.
///
/// For recurring rules `day` is the week of the month (1-5, where 5 means
/// the last week) and `day_of_week` counts from Sunday = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemTimeRule {
    pub year: u16,
    pub month: u16,
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub milliseconds: u16,
}

impl SystemTimeRule {
    fn from_words(words: &[i16]) -> Self {
        let w = |i: usize| words[i] as u16;
        Self {
            year: w(0),
            month: w(1),
            day_of_week: w(2),
            day: w(3),
            hour: w(4),
            minute: w(5),
            second: w(6),
            milliseconds: w(7),
        }
    }

    /// A zero month marks a zone without daylight saving transitions.
    pub fn is_set(&self) -> bool {
        self.month != 0
    }

    /// Find the date and time this rule falls on in `year`.
    pub fn locate(&self, year: i32) -> Result<NaiveDateTime> {
        let invalid = || FieldToolsError::InvalidTimeZone(format!("{:?} has no date in {}", self, year));

        let month = u32::from(self.month);
        let target = weekday_from_sunday(self.day_of_week).ok_or_else(invalid)?;
        let first_candidate = (u32::from(self.day).max(1) - 1) * 7 + 1;

        let mut date = NaiveDate::from_ymd_opt(year, month, first_candidate.min(28))
            .ok_or_else(invalid)?;
        if first_candidate > 28 {
            date = date + Duration::days(i64::from(first_candidate - 28));
        }

        let days_to_go = (target.num_days_from_monday() as i64
            - date.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        date = date + Duration::days(days_to_go);

        // week 5 means "last", so step back while we've spilled past the month
        while date.month() != month {
            date = date - Duration::weeks(1);
        }

        date.and_hms_milli_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            u32::from(self.milliseconds),
        )
        .ok_or_else(invalid)
    }
}

fn weekday_from_sunday(day: u16) -> Option<Weekday> {
    match day {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Rules for one zone from the platform timezone registry.
///
/// Biases follow the registry convention: UTC = local time + bias.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneRecord {
    pub key: String,
    pub display_name: String,
    pub standard_name: String,
    pub daylight_name: String,
    pub bias: Duration,
    pub standard_offset: Duration,
    pub daylight_offset: Duration,
    pub daylight_end: SystemTimeRule,
    pub daylight_start: SystemTimeRule,
    pub fixed_standard_time: bool,
}

impl TimeZoneRecord {
    /// Decode the 44 byte little-endian TZI value (3 x i32 then 2 x 8 x i16).
    pub fn from_tzi(
        key: impl Into<String>,
        display_name: impl Into<String>,
        standard_name: impl Into<String>,
        daylight_name: impl Into<String>,
        tzi: &[u8],
    ) -> Result<Self> {
        if tzi.len() != TZI_LEN {
            return Err(FieldToolsError::InvalidTimeZone(format!(
                "TZI must be {} bytes, got {}",
                TZI_LEN,
                tzi.len()
            )));
        }

        let long = |i: usize| {
            let start = i * 4;
            i32::from_le_bytes([tzi[start], tzi[start + 1], tzi[start + 2], tzi[start + 3]])
        };
        let words: Vec<i16> = tzi[12..]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            key: key.into(),
            display_name: display_name.into(),
            standard_name: standard_name.into(),
            daylight_name: daylight_name.into(),
            bias: Duration::minutes(i64::from(long(0))),
            standard_offset: Duration::minutes(i64::from(long(1))),
            daylight_offset: Duration::minutes(i64::from(long(2))),
            daylight_end: SystemTimeRule::from_words(&words[..8]),
            daylight_start: SystemTimeRule::from_words(&words[8..]),
            fixed_standard_time: false,
        })
    }

    /// Ignore daylight saving and always report standard time.
    pub fn with_fixed_standard_time(mut self, fixed: bool) -> Self {
        self.fixed_standard_time = fixed;
        self
    }

    pub fn standard_bias(&self) -> Duration {
        self.bias + self.standard_offset
    }

    pub fn daylight_bias(&self) -> Duration {
        self.bias + self.daylight_offset
    }

    pub fn dst_start(&self, year: i32) -> Result<NaiveDateTime> {
        self.daylight_start.locate(year)
    }

    pub fn dst_end(&self, year: i32) -> Result<NaiveDateTime> {
        self.daylight_end.locate(year)
    }

    /// Whether `local` falls inside the daylight period of its year.
    pub fn is_dst(&self, local: NaiveDateTime) -> bool {
        if self.fixed_standard_time
            || !self.daylight_start.is_set()
            || !self.daylight_end.is_set()
        {
            return false;
        }

        let year = local.year();
        match (self.dst_start(year), self.dst_end(year)) {
            (Ok(start), Ok(end)) if start <= end => start <= local && local < end,
            // southern hemisphere: the daylight period spans the new year
            (Ok(start), Ok(end)) => local >= start || local < end,
            _ => false,
        }
    }

    /// Offset added on top of the bias at `local`.
    pub fn dst(&self, local: NaiveDateTime) -> Duration {
        if self.is_dst(local) {
            self.daylight_offset
        } else {
            self.standard_offset
        }
    }

    /// Offset of local time from UTC (east positive).
    pub fn utc_offset(&self, local: NaiveDateTime) -> Duration {
        -(self.bias + self.dst(local))
    }

    pub fn tz_name(&self, local: NaiveDateTime) -> &str {
        if self.is_dst(local) {
            &self.daylight_name
        } else {
            &self.standard_name
        }
    }

    /// Convert a local time to UTC assuming standard time.
    pub fn to_utc_standard(&self, local: NaiveDateTime) -> NaiveDateTime {
        local + self.standard_bias()
    }

    pub fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        local - self.utc_offset(local)
    }
}

impl fmt::Display for TimeZoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
