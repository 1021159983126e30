use chrono::{Datelike, NaiveDate, TimeDelta, Utc};

use crate::error::{FieldToolsError, Result};
use crate::utils::constants::HALF_YEAR_DAYS;

/// Pick the year that puts julian `day` closest to `today`.
///
/// A day far ahead of today is taken to be from last year, and one far
/// behind today from next year.
pub fn nearest_year_for_day(day: u32, today: NaiveDate) -> i32 {
    let today_ordinal = i64::from(today.ordinal());
    let day = i64::from(day);
    let mut year = today.year();

    if day - today_ordinal > HALF_YEAR_DAYS {
        year -= 1;
    }
    if today_ordinal - day > HALF_YEAR_DAYS {
        year += 1;
    }
    year
}

pub fn nearest_year_for_day_now(day: u32) -> i32 {
    nearest_year_for_day(day, Utc::now().date_naive())
}

/// Date of julian `day` (1 = January 1st) in `year`.
///
/// ```
/// use chrono::NaiveDate;
/// use fieldtools::utils::dates::gregorian_date;
///
/// assert_eq!(gregorian_date(2024, 60).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn gregorian_date(year: i32, julian_day: i64) -> Result<NaiveDate> {
    let invalid = || FieldToolsError::InvalidDate(format!("day {} of year {}", julian_day, year));

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let offset = julian_day
        .checked_sub(1)
        .and_then(TimeDelta::try_days)
        .ok_or_else(invalid)?;
    jan_first.checked_add_signed(offset).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nearest_year_same_year() {
        let today = date(2024, 6, 1);
        assert_eq!(nearest_year_for_day(150, today), 2024);
        assert_eq!(nearest_year_for_day(1, today), 2024);
        assert_eq!(nearest_year_for_day(300, today), 2024);
    }

    #[test]
    fn test_nearest_year_wraps() {
        // early January: a december day is from last year
        assert_eq!(nearest_year_for_day(360, date(2024, 1, 5)), 2023);
        // late December: a january day is for next year
        assert_eq!(nearest_year_for_day(3, date(2024, 12, 28)), 2025);
    }

    #[test]
    fn test_nearest_year_half_year_boundary() {
        let today = date(2023, 1, 1);
        assert_eq!(nearest_year_for_day(183, today), 2023);
        assert_eq!(nearest_year_for_day(184, today), 2022);
    }

    #[test]
    fn test_gregorian_date() {
        assert_eq!(gregorian_date(2023, 1).unwrap(), date(2023, 1, 1));
        assert_eq!(gregorian_date(2023, 365).unwrap(), date(2023, 12, 31));
        assert_eq!(gregorian_date(2023, 366).unwrap(), date(2024, 1, 1));
        assert_eq!(gregorian_date(2023, 0).unwrap(), date(2022, 12, 31));
    }

    #[test]
    fn test_gregorian_date_out_of_range() {
        assert!(gregorian_date(2023, i64::MAX).is_err());
        assert!(gregorian_date(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_nearest_year_for_day_now() {
        let year = Utc::now().year();
        for day in [1, 183, 365] {
            assert!((year - 1..=year + 1).contains(&nearest_year_for_day_now(day)));
        }
    }
}
