//! Lenient field decoders for records written by other clients.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
///
/// # Errors
///
/// Returns an error message when the value matches neither form.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("unrecognized date {raw:?}"))
}

/// Serde adapter for optional dates that may be empty, null, or date-only.
pub mod optional_date {
    use super::{parse_date, DateTime, Deserialize, Deserializer, Serialize, Serializer, Utc};

    /// Deserializes a missing, null, or blank value as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when a non-blank value is not a recognized date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_date(value).map(Some).map_err(serde::de::Error::custom),
        }
    }

    /// Serializes as an RFC 3339 string or null.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }
}

/// Deserializes null as the type's default value.
///
/// # Errors
///
/// Returns an error when a non-null value has the wrong type.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
