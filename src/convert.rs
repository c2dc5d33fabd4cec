//! Scalar conversions out of a [JsonValue].
//!
//! Each conversion returns an [Option] rather than an error: a value of the wrong kind,
//! or one that cannot be represented in the target type, simply converts to [None].
//! The `lenient` flag on the boolean and numeric conversions additionally accepts
//! values that merely *look* right, such as the string `"true"` or `"1.5"`.
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::value::JsonValue;

/// How a string value is interpreted as a timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateStringFormat {
    /// ISO-8601 / RFC-3339, e.g. `2020-11-09T17:15:00Z`
    Iso8601,
    /// A caller-supplied [chrono::format::strftime] format string
    Custom(String),
}

/// How a numeric value is interpreted as a timestamp
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateNumberFormat {
    /// Seconds since the Unix epoch
    SecondsSince1970,
    /// Milliseconds since the Unix epoch
    MillisecondsSince1970,
}

impl JsonValue {
    /// Convert to a boolean. Strict mode accepts only [JsonValue::Boolean]; lenient
    /// mode additionally accepts the strings `"true"` and `"false"` and treats any
    /// non-zero number as `true`
    pub fn to_boolean(&self, lenient: bool) -> Option<bool> {
        match (self, lenient) {
            (JsonValue::Boolean(value), _) => Some(*value),
            (JsonValue::String(s), true) if s == "true" => Some(true),
            (JsonValue::String(s), true) if s == "false" => Some(false),
            (JsonValue::Number(value), true) => Some(*value != 0.0),
            _ => None,
        }
    }

    /// Convert to a float. Strict mode accepts only [JsonValue::Number]; lenient mode
    /// additionally accepts parseable number strings
    pub fn to_float(&self, lenient: bool) -> Option<f64> {
        match (self, lenient) {
            (JsonValue::Number(value), _) => Some(*value),
            (JsonValue::String(s), true) => s.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Convert to an integer, truncating toward zero. Strict mode accepts only
    /// [JsonValue::Number]; lenient mode additionally accepts integer strings and,
    /// failing that, float strings which are then truncated
    pub fn to_integer(&self, lenient: bool) -> Option<i64> {
        match (self, lenient) {
            (JsonValue::Number(value), _) => truncate_to_i64(*value),
            (JsonValue::String(s), true) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_to_i64)),
            _ => None,
        }
    }

    /// Borrow the underlying string, if this is a [JsonValue::String]
    pub fn to_text(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Convert to a UTC timestamp. Numbers are read according to `number_format`,
    /// strings according to `string_format`; anything else is [None]
    pub fn to_date(
        &self,
        string_format: &DateStringFormat,
        number_format: DateNumberFormat,
    ) -> Option<DateTime<Utc>> {
        match self {
            JsonValue::Number(value) => {
                let millis = match number_format {
                    DateNumberFormat::SecondsSince1970 => *value * 1000.0,
                    DateNumberFormat::MillisecondsSince1970 => *value,
                };
                DateTime::from_timestamp_millis(truncate_to_i64(millis)?)
            }
            JsonValue::String(value) => match string_format {
                DateStringFormat::Iso8601 => DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|parsed| parsed.with_timezone(&Utc)),
                DateStringFormat::Custom(format) => DateTime::parse_from_str(value, format)
                    .ok()
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .or_else(|| {
                        // formats without a zone specifier are taken as UTC
                        NaiveDateTime::parse_from_str(value, format)
                            .ok()
                            .map(|naive| naive.and_utc())
                    }),
            },
            _ => None,
        }
    }
}

/// Truncate an `f64` toward zero, refusing NaN and values outside the `i64` range
fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_boolean_conversion_should_require_a_boolean() {
        assert_eq!(JsonValue::Boolean(true).to_boolean(false), Some(true));
        assert_eq!(JsonValue::from("true").to_boolean(false), None);
        assert_eq!(JsonValue::Number(1.0).to_boolean(false), None);
    }

    #[test]
    fn lenient_boolean_conversion_should_accept_lookalikes() {
        assert_eq!(JsonValue::from("true").to_boolean(true), Some(true));
        assert_eq!(JsonValue::from("false").to_boolean(true), Some(false));
        assert_eq!(JsonValue::from("yes").to_boolean(true), None);
        assert_eq!(JsonValue::Number(0.0).to_boolean(true), Some(false));
        assert_eq!(JsonValue::Number(-3.5).to_boolean(true), Some(true));
        assert_eq!(JsonValue::Null.to_boolean(true), None);
    }

    #[test]
    fn integer_conversion_should_truncate_toward_zero() {
        assert_eq!(JsonValue::Number(3.9).to_integer(false), Some(3));
        assert_eq!(JsonValue::Number(-3.9).to_integer(false), Some(-3));
        assert_eq!(JsonValue::Number(f64::NAN).to_integer(false), None);
        assert_eq!(JsonValue::Number(1e300).to_integer(false), None);
    }

    #[test]
    fn lenient_numeric_conversions_should_parse_strings() {
        assert_eq!(JsonValue::from("42").to_integer(true), Some(42));
        assert_eq!(JsonValue::from("42.7").to_integer(true), Some(42));
        assert_eq!(JsonValue::from("nope").to_integer(true), None);
        assert_eq!(JsonValue::from("2.5").to_float(true), Some(2.5));
        assert_eq!(JsonValue::from("2.5").to_float(false), None);
    }

    #[test]
    fn text_conversion_should_borrow() {
        assert_eq!(JsonValue::from("hello").to_text(), Some("hello"));
        assert_eq!(JsonValue::Number(1.0).to_text(), None);
    }
}
