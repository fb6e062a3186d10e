//! JSON output formatting for forms.

use formkit_core::{FieldError, FormSchema, FormSession};

/// Summary of a saved form for listings.
pub fn form_summary_json(form: &FormSchema) -> serde_json::Value {
    serde_json::json!({
        "id": form.id,
        "name": form.name,
        "createdAt": form.created_at.to_rfc3339(),
        "fieldCount": form.fields.len(),
    })
}

/// A saved form in its stored layout.
pub fn form_json(form: &FormSchema) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(form)?)
}

/// Values, errors, and cycle state of a filled-in form.
pub fn fill_json(session: &FormSession, errors: &[FieldError]) -> serde_json::Value {
    let fields: Vec<serde_json::Value> = session
        .fields()
        .iter()
        .map(|field| {
            let error = errors
                .iter()
                .find(|e| e.field_id == field.id)
                .map(|e| e.message.as_str());
            serde_json::json!({
                "id": field.id,
                "label": field.label,
                "derived": field.is_derived,
                "value": session.value(&field.id),
                "error": error,
            })
        })
        .collect();

    serde_json::json!({
        "valid": errors.is_empty() && session.cycle().is_none(),
        "fields": fields,
        "cycle": session.cycle(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use formkit_core::{DerivedConfig, FieldType, NewField, ValidationRule};

    #[test]
    fn test_summary_json() {
        let form = FormSchema {
            id: "abc".into(),
            name: "Signup".into(),
            fields: vec![NewField::new(FieldType::Text, "Name").into_field("f1")],
            created_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        };
        let json = form_summary_json(&form);
        assert_eq!(json["id"], "abc");
        assert_eq!(json["fieldCount"], 1);
        assert_eq!(json["createdAt"], "2026-10-18T09:00:00+00:00");
    }

    #[test]
    fn test_fill_json_reports_values_and_errors() {
        let fields = vec![
            NewField::new(FieldType::Number, "A")
                .with_rule(ValidationRule::required("A is required"))
                .into_field("a"),
            NewField::new(FieldType::Number, "Twice")
                .derived(DerivedConfig::custom(vec!["a".into()], "field1 * 2"))
                .into_field("b"),
        ];
        let mut session =
            FormSession::with_today(fields, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let errors = session.validate();

        let json = fill_json(&session, &errors);

        assert_eq!(json["valid"], false);
        assert_eq!(json["fields"][0]["value"], serde_json::Value::Null);
        assert_eq!(json["fields"][0]["error"], "A is required");
        assert_eq!(json["fields"][1]["value"], 0);
        assert_eq!(json["fields"][1]["derived"], true);
        assert_eq!(json["cycle"], serde_json::Value::Null);
    }
}
