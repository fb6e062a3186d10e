//! Parsing helpers for assignments, dates, and field references.

use chrono::NaiveDate;
use formkit_core::FormField;

/// Split a `NAME=VALUE` argument at the first `=`.
pub fn parse_assignment(value: &str) -> anyhow::Result<(&str, &str)> {
    let (name, rest) = value
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected NAME=VALUE, got: {}", value))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Missing name in: {}", value));
    }
    Ok((name, rest))
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {}", value))
}

/// Parse a 1-based position.
pub fn parse_position(value: &str) -> anyhow::Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(pos) if pos >= 1 => Ok(pos),
        _ => Err(anyhow::anyhow!(
            "Invalid position (expected a number from 1): {}",
            value
        )),
    }
}

/// Find a field by exact id, then by unique id prefix, then by label
/// (case-insensitive).
pub fn resolve_field<'a>(fields: &'a [FormField], reference: &str) -> anyhow::Result<&'a FormField> {
    if let Some(field) = fields.iter().find(|f| f.id == reference) {
        return Ok(field);
    }

    let by_prefix: Vec<&FormField> = fields
        .iter()
        .filter(|f| f.id.starts_with(reference))
        .collect();
    if let [field] = by_prefix.as_slice() {
        return Ok(*field);
    }

    let by_label: Vec<&FormField> = fields
        .iter()
        .filter(|f| f.label.eq_ignore_ascii_case(reference))
        .collect();
    match by_label.as_slice() {
        [field] => Ok(*field),
        [] if by_prefix.is_empty() => Err(anyhow::anyhow!(
            "Field \"{}\" not found.\nHint: Run `formkit show <ID>` to list field ids.",
            reference
        )),
        _ => Err(anyhow::anyhow!(
            "Field \"{}\" is ambiguous; use the field id",
            reference
        )),
    }
}
