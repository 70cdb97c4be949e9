//! 时间工具函数: 月度查询范围
//!
//! 所有范围均为 UTC。`day` 字段以 `YYYY-MM-DD` 字符串比较，
//! `createdAt` 以 Unix millis 比较。

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

use super::{AppError, AppResult};

pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

/// Inclusive UTC range covering one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub month: u32,
    pub year: i32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    /// First day 00:00:00.000
    pub start: DateTime<Utc>,
    /// Last day 23:59:59.999
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Build the range for `month`/`year`, both validated
    pub fn new(month: u32, year: i32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation("month must be between 1 and 12")
                .with_detail("month", month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::validation(format!(
                "year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            ))
            .with_detail("year", year));
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::validation("Invalid month or year"))?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last_day = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| AppError::validation("Invalid month or year"))?;

        let start = first_day
            .and_hms_milli_opt(0, 0, 0, 0)
            .ok_or_else(|| AppError::internal("Failed to build month start"))?
            .and_utc();
        let end = last_day
            .and_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| AppError::internal("Failed to build month end"))?
            .and_utc();

        Ok(Self {
            month,
            year,
            first_day,
            last_day,
            start,
            end,
        })
    }

    /// Range for the given month/year, falling back to the current UTC month/year
    pub fn resolve(month: Option<u32>, year: Option<i32>) -> AppResult<Self> {
        let now = Utc::now();
        Self::new(
            month.unwrap_or_else(|| now.month()),
            year.unwrap_or_else(|| now.year()),
        )
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn first_day_str(&self) -> String {
        self.first_day.format("%Y-%m-%d").to_string()
    }

    pub fn last_day_str(&self) -> String {
        self.last_day.format("%Y-%m-%d").to_string()
    }

    /// RFC 3339 with millisecond precision and `Z` suffix
    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_february() {
        let range = MonthRange::new(2, 2024).unwrap();
        assert_eq!(range.start_rfc3339(), "2024-02-01T00:00:00.000Z");
        assert_eq!(range.end_rfc3339(), "2024-02-29T23:59:59.999Z");
        assert_eq!(range.first_day_str(), "2024-02-01");
        assert_eq!(range.last_day_str(), "2024-02-29");
    }

    #[test]
    fn test_non_leap_february_and_december() {
        let feb = MonthRange::new(2, 2023).unwrap();
        assert_eq!(feb.last_day_str(), "2023-02-28");

        let dec = MonthRange::new(12, 2023).unwrap();
        assert_eq!(dec.end_rfc3339(), "2023-12-31T23:59:59.999Z");
        assert_eq!(dec.end_millis() + 1, MonthRange::new(1, 2024).unwrap().start_millis());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(MonthRange::new(0, 2024).is_err());
        assert!(MonthRange::new(13, 2024).is_err());
        assert!(MonthRange::new(1, 1969).is_err());
        assert!(MonthRange::new(1, 10000).is_err());
    }

    #[test]
    fn test_resolve_defaults_to_current_month() {
        let now = Utc::now();
        let range = MonthRange::resolve(None, None).unwrap();
        // Could straddle a month boundary; the range still has to be valid
        assert!(range.start <= range.end);
        if range.month == now.month() {
            assert_eq!(range.year, now.year());
        }

        let explicit = MonthRange::resolve(Some(7), Some(2021)).unwrap();
        assert_eq!(explicit.first_day_str(), "2021-07-01");
    }
}
