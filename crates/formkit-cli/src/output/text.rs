//! Text and table output formatting for forms.

use formkit_core::{ComputationType, FieldError, FieldIssue, FormField, FormSchema, FormSession};

use crate::ui::{badge, format_datetime, kv, print, single_line, table, Badge, Column, UiContext};

/// Rules as a short comma-separated list, e.g. `required, minLength 3`.
pub fn describe_rules(field: &FormField) -> String {
    field
        .validation_rules
        .iter()
        .map(|rule| match rule.threshold {
            Some(n) if rule.kind.uses_threshold() => format!("{} {}", rule.kind.as_str(), n),
            _ => rule.kind.as_str().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Derivation in terms of parent labels, e.g. `sum(Price, Tax)`.
pub fn describe_derivation(field: &FormField, fields: &[FormField]) -> String {
    let Some(config) = field.derivation() else {
        return String::new();
    };
    let parents: Vec<&str> = config
        .parent_fields
        .iter()
        .map(|id| {
            fields
                .iter()
                .find(|f| f.id == *id)
                .map(|f| f.label.as_str())
                .unwrap_or(id.as_str())
        })
        .collect();
    match &config.computation_type {
        ComputationType::Custom => format!("{} [{}]", config.formula, parents.join(", ")),
        other => format!("{}({})", other.as_str(), parents.join(", ")),
    }
}

/// Print a saved form's details and field table.
pub fn print_form(ctx: &UiContext, form: &FormSchema) {
    print(ctx, &kv(ctx, "ID", &form.id));
    print(ctx, &kv(ctx, "Name", &single_line(&form.name)));
    print(
        ctx,
        &kv(ctx, "Created", &format_datetime(&form.created_at, ctx.mode.is_pretty())),
    );
    print(ctx, &kv(ctx, "Fields", &form.fields.len().to_string()));

    if form.fields.is_empty() {
        return;
    }
    let columns = [
        Column::new("ID"),
        Column::new("Label"),
        Column::new("Type"),
        Column::new("Rules"),
        Column::new("Derived"),
    ];
    let rows: Vec<Vec<String>> = form
        .fields
        .iter()
        .map(|field| {
            vec![
                field.id.clone(),
                single_line(&field.label),
                field.field_type.as_str().to_string(),
                describe_rules(field),
                describe_derivation(field, &form.fields),
            ]
        })
        .collect();
    print(ctx, &table(ctx, &columns, &rows));
}

/// Print configuration issues to stderr.
pub fn print_issues(ctx: &UiContext, issues: &[FieldIssue]) {
    for issue in issues {
        if ctx.mode.is_pretty() {
            eprintln!("{}", badge(ctx, Badge::Warn, &issue.to_string()));
        } else {
            eprintln!("warning={}", issue);
        }
    }
}

/// Print field values with their validation errors.
pub fn print_fill(ctx: &UiContext, session: &FormSession, errors: &[FieldError]) {
    let columns = [
        Column::new("Field"),
        Column::new("Value"),
        Column::new("Status"),
    ];
    let rows: Vec<Vec<String>> = session
        .fields()
        .iter()
        .map(|field| {
            let status = match errors.iter().find(|e| e.field_id == field.id) {
                Some(error) => error.message.clone(),
                None if field.is_derived => "derived".to_string(),
                None => "ok".to_string(),
            };
            vec![
                single_line(&field.label),
                single_line(&session.value(&field.id).to_string()),
                status,
            ]
        })
        .collect();
    print(ctx, &table(ctx, &columns, &rows));

    if let Some(cycle) = session.cycle() {
        print(
            ctx,
            &badge(
                ctx,
                Badge::Warn,
                &format!("Derived fields loop: {}", cycle.join(" -> ")),
            ),
        );
    }
}
