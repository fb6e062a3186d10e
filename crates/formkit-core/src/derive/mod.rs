//! Derived (auto-computed) field values.
//!
//! `compute_derived_value` evaluates one field against the current value
//! mapping. It never fails: malformed input computes to zero. Propagating
//! changes through chains of derived fields is the job of
//! [`recompute_derived`].

pub mod formula;
mod recompute;

pub use recompute::{find_dependency_cycle, recompute_derived, Recomputation};

use chrono::{Local, NaiveDate};

use crate::numeric::whole_years_between;
use crate::schema::{ComputationType, DerivedConfig, FormField};
use crate::value::{FieldValue, FormValues};

/// Compute the display value of `field` as of today's local date.
pub fn compute_derived_value(
    field: &FormField,
    values: &FormValues,
    all_fields: &[FormField],
) -> FieldValue {
    compute_derived_value_on(field, values, all_fields, Local::now().date_naive())
}

/// Compute the display value of `field` with an explicit evaluation date.
///
/// Plain fields return their current value, falling back to the default.
/// `all_fields` is accepted so every field can be evaluated uniformly.
pub fn compute_derived_value_on(
    field: &FormField,
    values: &FormValues,
    _all_fields: &[FormField],
    today: NaiveDate,
) -> FieldValue {
    let Some(config) = field.derivation() else {
        return values
            .get(&field.id)
            .filter(|value| !value.is_absent())
            .cloned()
            .unwrap_or_else(|| field.default_value.clone());
    };

    let result = match &config.computation_type {
        ComputationType::Sum => sum_parents(config, values),
        ComputationType::AgeFromDateOfBirth => age_from_parent(config, values, today),
        ComputationType::Custom => evaluate_custom(config, values),
        ComputationType::Unknown(_) => 0.0,
    };
    FieldValue::Number(result)
}

fn parent_value<'v>(values: &'v FormValues, id: &str) -> &'v FieldValue {
    static ABSENT: FieldValue = FieldValue::Absent;
    values.get(id).unwrap_or(&ABSENT)
}

/// Sum of the numeric parents; `Infinity + -Infinity` and other
/// non-finite totals are 0.
fn sum_parents(config: &DerivedConfig, values: &FormValues) -> f64 {
    let total: f64 = config
        .parent_fields
        .iter()
        .map(|id| parent_value(values, id).to_number())
        .filter(|n| !n.is_nan())
        .sum();
    if total.is_finite() {
        total
    } else {
        0.0
    }
}

fn age_from_parent(config: &DerivedConfig, values: &FormValues, today: NaiveDate) -> f64 {
    let [parent] = config.parent_fields.as_slice() else {
        return 0.0;
    };
    match parent_value(values, parent).to_date() {
        Some(birth) => whole_years_between(birth, today) as f64,
        None => 0.0,
    }
}

fn evaluate_custom(config: &DerivedConfig, values: &FormValues) -> f64 {
    let operands: Vec<String> = config
        .parent_fields
        .iter()
        .map(|id| parent_value(values, id).to_formula_operand())
        .collect();
    let expr = formula::substitute_placeholders(&config.formula, &operands);
    match formula::evaluate(&expr) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(formula = %config.formula, error = %err, "custom formula evaluated to 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, NewField};
    use chrono::{Datelike, Duration};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn derived(config: DerivedConfig) -> FormField {
        NewField::new(FieldType::Number, "Derived")
            .derived(config)
            .into_field("derived")
    }

    fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
        pairs
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_plain_field_returns_current_or_default() {
        let field = NewField::new(FieldType::Text, "Name")
            .with_default("anon")
            .into_field("name");

        let empty = FormValues::new();
        assert_eq!(
            compute_derived_value_on(&field, &empty, &[], today()),
            FieldValue::text("anon")
        );

        let filled = values(&[("name", FieldValue::text("Ada"))]);
        assert_eq!(
            compute_derived_value_on(&field, &filled, &[], today()),
            FieldValue::text("Ada")
        );
    }

    #[test]
    fn test_sum_mixes_numbers_text_and_missing() {
        let field = derived(DerivedConfig::sum(vec!["a".into(), "b".into(), "c".into()]));
        let current = values(&[
            ("a", FieldValue::Number(3.0)),
            ("b", FieldValue::text("4")),
        ]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(7.0)
        );
    }

    #[test]
    fn test_sum_treats_garbage_as_zero() {
        let field = derived(DerivedConfig::sum(vec!["a".into(), "b".into()]));
        let current = values(&[
            ("a", FieldValue::text("abc")),
            ("b", FieldValue::Boolean(true)),
        ]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_sum_of_no_parents_is_zero() {
        let field = derived(DerivedConfig::sum(Vec::new()));
        assert_eq!(
            compute_derived_value_on(&field, &FormValues::new(), &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_age_on_and_before_birthday() {
        let field = derived(DerivedConfig::age_from_dob("dob"));
        let ten_years_ago = today().with_year(today().year() - 10).unwrap();

        let on_birthday = values(&[("dob", FieldValue::Date(ten_years_ago))]);
        assert_eq!(
            compute_derived_value_on(&field, &on_birthday, &[], today()),
            FieldValue::Number(10.0)
        );

        let birthday_tomorrow = values(&[(
            "dob",
            FieldValue::Date(ten_years_ago + Duration::days(1)),
        )]);
        assert_eq!(
            compute_derived_value_on(&field, &birthday_tomorrow, &[], today()),
            FieldValue::Number(9.0)
        );

        let birthday_yesterday = values(&[(
            "dob",
            FieldValue::text((ten_years_ago - Duration::days(1)).format("%Y-%m-%d").to_string()),
        )]);
        assert_eq!(
            compute_derived_value_on(&field, &birthday_yesterday, &[], today()),
            FieldValue::Number(10.0)
        );
    }

    #[test]
    fn test_age_degenerate_cases_are_zero() {
        let missing = derived(DerivedConfig::age_from_dob("dob"));
        assert_eq!(
            compute_derived_value_on(&missing, &FormValues::new(), &[], today()),
            FieldValue::Number(0.0)
        );

        let garbage = values(&[("dob", FieldValue::text("not a date"))]);
        assert_eq!(
            compute_derived_value_on(&missing, &garbage, &[], today()),
            FieldValue::Number(0.0)
        );

        let two_parents = derived(DerivedConfig::new(
            ComputationType::AgeFromDateOfBirth,
            vec!["a".into(), "b".into()],
        ));
        let current = values(&[("a", FieldValue::text("2000-01-01"))]);
        assert_eq!(
            compute_derived_value_on(&two_parents, &current, &[], today()),
            FieldValue::Number(0.0)
        );

        let no_parents = derived(DerivedConfig::new(
            ComputationType::AgeFromDateOfBirth,
            Vec::new(),
        ));
        assert_eq!(
            compute_derived_value_on(&no_parents, &current, &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_custom_formula() {
        let field = derived(DerivedConfig::custom(vec!["x".into()], "field1*2"));
        let current = values(&[("x", FieldValue::Number(5.0))]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(10.0)
        );
    }

    #[test]
    fn test_custom_formula_missing_parent_is_zero_operand() {
        let field = derived(DerivedConfig::custom(
            vec!["x".into(), "y".into()],
            "(field1 + field2) / 2",
        ));
        let current = values(&[("x", FieldValue::text("8"))]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(4.0)
        );
    }

    #[test]
    fn test_custom_malformed_formula_is_zero() {
        let current = values(&[("x", FieldValue::Number(5.0))]);
        for formula in ["field1 *", "process.exit()", "field1 / 0", "field2 + 1"] {
            let field = derived(DerivedConfig::custom(vec!["x".into()], formula));
            assert_eq!(
                compute_derived_value_on(&field, &current, &[], today()),
                FieldValue::Number(0.0),
                "formula {formula:?}"
            );
        }
    }

    #[test]
    fn test_custom_text_operand_that_is_not_numeric_is_zero() {
        let field = derived(DerivedConfig::custom(vec!["x".into()], "field1 + 1"));
        let current = values(&[("x", FieldValue::text("abc"))]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_non_finite_sum_is_zero() {
        let field = derived(DerivedConfig::sum(vec!["x".into(), "y".into()]));
        let opposite = values(&[
            ("x", FieldValue::text("Infinity")),
            ("y", FieldValue::text("-Infinity")),
        ]);
        let overflow = values(&[
            ("x", FieldValue::Number(f64::MAX)),
            ("y", FieldValue::Number(f64::MAX)),
        ]);

        assert_eq!(
            compute_derived_value_on(&field, &opposite, &[], today()),
            FieldValue::Number(0.0)
        );
        assert_eq!(
            compute_derived_value_on(&field, &overflow, &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_unknown_computation_is_zero() {
        let field = derived(DerivedConfig::new(
            ComputationType::Unknown("median".into()),
            vec!["x".into()],
        ));
        let current = values(&[("x", FieldValue::Number(5.0))]);
        assert_eq!(
            compute_derived_value_on(&field, &current, &[], today()),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_compute_is_idempotent() {
        let field = derived(DerivedConfig::custom(vec!["x".into()], "field1 * 3 - 1"));
        let current = values(&[("x", FieldValue::Number(2.0))]);
        let fields = vec![field.clone()];
        let first = compute_derived_value(&field, &current, &fields);
        let second = compute_derived_value(&field, &current, &fields);
        assert_eq!(first, second);
        assert_eq!(first, FieldValue::Number(5.0));
    }
}
