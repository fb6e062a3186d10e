//! Field validation.
//!
//! Rules are checked in order and the first failure's message is reported.
//! Length, email and password rules only look at text; any other value
//! passes them untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{RuleKind, ValidationRule};
use crate::value::FieldValue;

/// Minimum password length for the password policy rule.
pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Return the message of the first rule `value` violates, if any.
pub fn validate_field<'r>(value: &FieldValue, rules: &'r [ValidationRule]) -> Option<&'r str> {
    rules
        .iter()
        .find(|rule| violates(value, rule))
        .map(|rule| rule.message.as_str())
}

/// Whether `value` fails a single rule.
pub fn violates(value: &FieldValue, rule: &ValidationRule) -> bool {
    match &rule.kind {
        RuleKind::Required => match value {
            FieldValue::Absent => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        },
        RuleKind::MinLength => match (value.as_text(), rule.threshold) {
            (Some(text), Some(min)) => (text.chars().count() as u64) < min,
            _ => false,
        },
        RuleKind::MaxLength => match (value.as_text(), rule.threshold) {
            (Some(text), Some(max)) => (text.chars().count() as u64) > max,
            _ => false,
        },
        RuleKind::Email => value
            .as_text()
            .is_some_and(|text| !EMAIL_RE.is_match(&text)),
        RuleKind::PasswordPolicy => value
            .as_text()
            .is_some_and(|text| !meets_password_policy(&text)),
        RuleKind::Unknown(_) => false,
    }
}

/// At least eight characters on a single line, one of them a digit.
fn meets_password_policy(text: &str) -> bool {
    let single_line = !text.contains(['\n', '\r', '\u{2028}', '\u{2029}']);
    single_line
        && text.chars().count() >= MIN_PASSWORD_CHARS
        && text.chars().any(|c| c.is_ascii_digit())
}
