use chrono::{DateTime, NaiveDate};
use serde_json::Number;
use uuid::Uuid;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Length of a record identifier (UUID v4, simple form)
pub const RECORD_ID_LEN: usize = 32;

/// Generate a new record identifier.
///
/// Identifiers are UUID v4 rendered in lowercase "simple" form (32 hex
/// digits, no hyphens) and double as the record key inside the store.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Check whether `id` has the syntax of a record identifier.
///
/// Only syntax is checked, not existence.
pub fn is_valid_record_id(id: &str) -> bool {
    id.len() == RECORD_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep their UTC calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

/// Integer value of a JSON number, accepting whole floats such as `2.0`
pub fn whole_number(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_id_is_valid() {
        let id = new_record_id();
        assert_eq!(id.len(), RECORD_ID_LEN);
        assert!(is_valid_record_id(&id));
        assert_ne!(id, new_record_id());
    }

    #[test]
    fn test_record_id_syntax() {
        assert!(is_valid_record_id("0123456789abcdef0123456789ABCDEF"));
        assert!(!is_valid_record_id("not-an-id"));
        assert!(!is_valid_record_id(""));
        // hyphenated UUIDs are not accepted
        assert!(!is_valid_record_id("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!is_valid_record_id("0123456789abcdef0123456789abcdeg"));
    }

    #[test]
    fn test_parse_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_calendar_date("2024-02-29"), Some(expected));
        assert_eq!(
            parse_calendar_date("2024-02-29T10:30:00.000Z"),
            Some(expected)
        );
        assert_eq!(
            parse_calendar_date("2024-03-01T01:00:00+02:00"),
            Some(expected)
        );
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("yesterday"), None);
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(&Number::from(3)), Some(3));
        assert_eq!(whole_number(&Number::from_f64(2.0).unwrap()), Some(2));
        assert_eq!(whole_number(&Number::from_f64(-1.0).unwrap()), Some(-1));
        assert_eq!(whole_number(&Number::from_f64(1.5).unwrap()), None);
        assert_eq!(whole_number(&Number::from_f64(1e300).unwrap()), None);
        assert_eq!(whole_number(&Number::from(u64::MAX)), None);
    }
}
