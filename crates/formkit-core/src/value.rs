//! Runtime field values.
//!
//! Stored schemas carry untyped default values, and form inputs produce
//! strings, numbers and booleans. `FieldValue` gives those a closed set of
//! variants plus the conversions each evaluator is allowed to apply.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::numeric::{format_number, parse_float_prefix};

/// Canonical date format used by date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current value of every field in a form, keyed by field id.
pub type FormValues = HashMap<String, FieldValue>;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value entered
    #[default]
    Absent,
    /// Free text, also what select/radio inputs produce
    Text(String),
    /// Numeric value
    Number(f64),
    /// Checkbox state
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Textual view of string-like values.
    ///
    /// Dates count as text because date inputs hand back `YYYY-MM-DD`
    /// strings; numbers and booleans do not.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Date(d) => Some(Cow::Owned(d.format(DATE_FORMAT).to_string())),
            _ => None,
        }
    }

    /// Numeric reading of this value, `NaN` when it has none.
    ///
    /// Text is read by its longest numeric prefix.
    pub fn to_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(_) | FieldValue::Date(_) => self
                .as_text()
                .and_then(|text| parse_float_prefix(&text))
                .unwrap_or(f64::NAN),
            FieldValue::Boolean(_) | FieldValue::Absent => f64::NAN,
        }
    }

    /// Date reading of this value.
    ///
    /// Accepts a date, `YYYY-MM-DD` text, or an RFC 3339 timestamp.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => {
                let s = s.trim();
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .ok()
                    .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
            }
            _ => None,
        }
    }

    /// String spliced into a custom formula in place of a placeholder.
    ///
    /// Missing and empty values stand in as `0`.
    pub fn to_formula_operand(&self) -> String {
        match self {
            FieldValue::Absent => "0".to_string(),
            FieldValue::Text(s) if s.is_empty() => "0".to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }

    /// Parse raw user input according to the kind of field receiving it.
    pub fn from_input(field_type: crate::schema::FieldType, raw: &str) -> Self {
        use crate::schema::FieldType;

        match field_type {
            FieldType::Checkbox => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => FieldValue::Boolean(true),
                _ => FieldValue::Boolean(false),
            },
            FieldType::Number => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => FieldValue::Number(n),
                _ if raw.is_empty() => FieldValue::Absent,
                _ => FieldValue::Text(raw.to_string()),
            },
            FieldType::Date => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                Ok(d) => FieldValue::Date(d),
                Err(_) if raw.is_empty() => FieldValue::Absent,
                Err(_) => FieldValue::Text(raw.to_string()),
            },
            _ => FieldValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Absent => serializer.serialize_none(),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
        }
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<FieldValue, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        // Only canonical dates become dates so text survives a round trip.
        match NaiveDate::parse_from_str(v, DATE_FORMAT) {
            Ok(d) if d.format(DATE_FORMAT).to_string() == v => Ok(FieldValue::Date(d)),
            _ => Ok(FieldValue::Text(v.to_string())),
        }
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        self.visit_str(&v)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_json_decoding_picks_variants() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "hi", "2001-02-03", "2001-2-3"]"#)
                .unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Absent,
                FieldValue::Boolean(true),
                FieldValue::Number(3.0),
                FieldValue::Number(2.5),
                FieldValue::text("hi"),
                FieldValue::Date(date(2001, 2, 3)),
                FieldValue::text("2001-2-3"),
            ]
        );
    }

    #[test]
    fn test_json_encoding_keeps_integers_integral() {
        let encoded = serde_json::to_string(&vec![
            FieldValue::Number(7.0),
            FieldValue::Number(0.25),
            FieldValue::Date(date(1990, 12, 1)),
            FieldValue::Absent,
        ])
        .unwrap();
        assert_eq!(encoded, r#"[7,0.25,"1990-12-01",null]"#);
    }

    #[test]
    fn test_as_text_only_for_string_like() {
        assert_eq!(FieldValue::text("a").as_text().as_deref(), Some("a"));
        assert_eq!(
            FieldValue::Date(date(2020, 1, 5)).as_text().as_deref(),
            Some("2020-01-05")
        );
        assert!(FieldValue::Number(5.0).as_text().is_none());
        assert!(FieldValue::Boolean(true).as_text().is_none());
        assert!(FieldValue::Absent.as_text().is_none());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(FieldValue::Number(3.0).to_number(), 3.0);
        assert_eq!(FieldValue::text("4").to_number(), 4.0);
        assert_eq!(FieldValue::text("4kg").to_number(), 4.0);
        assert!(FieldValue::text("kg").to_number().is_nan());
        assert!(FieldValue::Boolean(true).to_number().is_nan());
        assert!(FieldValue::Absent.to_number().is_nan());
    }

    #[test]
    fn test_to_date() {
        assert_eq!(
            FieldValue::text("1999-03-04").to_date(),
            Some(date(1999, 3, 4))
        );
        assert_eq!(
            FieldValue::text("1999-03-04T10:00:00Z").to_date(),
            Some(date(1999, 3, 4))
        );
        assert_eq!(FieldValue::text("yesterday").to_date(), None);
        assert_eq!(FieldValue::Number(1.0).to_date(), None);
    }

    #[test]
    fn test_formula_operand() {
        assert_eq!(FieldValue::Absent.to_formula_operand(), "0");
        assert_eq!(FieldValue::text("").to_formula_operand(), "0");
        assert_eq!(FieldValue::Number(5.0).to_formula_operand(), "5");
        assert_eq!(FieldValue::text("2.5").to_formula_operand(), "2.5");
    }

    #[test]
    fn test_from_input_by_field_type() {
        assert_eq!(
            FieldValue::from_input(FieldType::Number, "12"),
            FieldValue::Number(12.0)
        );
        assert_eq!(FieldValue::from_input(FieldType::Number, ""), FieldValue::Absent);
        assert_eq!(
            FieldValue::from_input(FieldType::Checkbox, "yes"),
            FieldValue::Boolean(true)
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Date, "2000-01-01"),
            FieldValue::Date(date(2000, 1, 1))
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Text, "12"),
            FieldValue::text("12")
        );
    }
}
