//! Common serde helpers for model fields
//!
//! Calendar dates are stored and returned as `YYYY-MM-DD`; on input an
//! RFC 3339 timestamp is accepted as well.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

use crate::util::{parse_calendar_date, whole_number};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Option<NaiveDate> as `YYYY-MM-DD`, accepting timestamps on input
pub mod option_calendar_date {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => s.serialize_some(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) => parse_calendar_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw))),
        }
    }
}

/// Integer that may arrive as a whole float (`2.0`)
pub fn integer<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let n = serde_json::Number::deserialize(d)?;
    whole_number(&n).ok_or_else(|| D::Error::custom(format!("invalid integer: {}", n)))
}

/// Option<i64> counterpart of [`integer`]
pub fn option_integer<'de, D>(d: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Number>::deserialize(d)? {
        None => Ok(None),
        Some(n) => whole_number(&n)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid integer: {}", n))),
    }
}

/// Deserialize a string that treats null as empty
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "option_calendar_date")]
        day: Option<NaiveDate>,
        #[serde(default, deserialize_with = "string_or_empty")]
        avatar: String,
        #[serde(default, deserialize_with = "option_integer")]
        slots: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Count {
        #[serde(deserialize_with = "integer")]
        n: i64,
    }

    #[test]
    fn test_accepts_date_and_timestamp() {
        let h: Holder = serde_json::from_str(r#"{"day":"2024-02-10"}"#).unwrap();
        assert_eq!(h.day, NaiveDate::from_ymd_opt(2024, 2, 10));

        let h: Holder = serde_json::from_str(r#"{"day":"2024-02-10T08:00:00.000Z"}"#).unwrap();
        assert_eq!(h.day, NaiveDate::from_ymd_opt(2024, 2, 10));
    }

    #[test]
    fn test_serializes_date_only() {
        let h = Holder {
            day: NaiveDate::from_ymd_opt(2024, 2, 10),
            avatar: String::new(),
            slots: None,
        };
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["day"], "2024-02-10");
    }

    #[test]
    fn test_null_and_missing() {
        let h: Holder = serde_json::from_str(r#"{"day":null,"avatar":null}"#).unwrap();
        assert!(h.day.is_none());
        assert_eq!(h.avatar, "");

        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.day.is_none());
    }

    #[test]
    fn test_integers_accept_whole_floats() {
        let h: Holder = serde_json::from_str(r#"{"slots":2.0}"#).unwrap();
        assert_eq!(h.slots, Some(2));
        assert!(serde_json::from_str::<Holder>(r#"{"slots":2.5}"#).is_err());

        let c: Count = serde_json::from_str(r#"{"n":4.0}"#).unwrap();
        assert_eq!(c.n, 4);
        assert!(serde_json::from_str::<Count>(r#"{"n":"4"}"#).is_err());
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(serde_json::from_str::<Holder>(r#"{"day":"2024-13-01"}"#).is_err());
    }
}
