use formkit_core::{lint_fields, FormField};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::{parse_assignment, parse_position, resolve_field};
use crate::output::{form_json, print_issues};
use crate::ui::{print, receipt};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let source = store.find_saved(&args.id)?.clone();
    store.load_form(&source);

    for reference in &args.remove {
        let id = resolve_field(&store.current().fields, reference)?.id.clone();
        store.delete_field(&id);
    }

    if !args.moves.is_empty() {
        let mut fields = store.current().fields.clone();
        for assignment in &args.moves {
            let (reference, position) = parse_assignment(assignment)?;
            let position = parse_position(position)?;
            move_field(&mut fields, reference, position)?;
        }
        store.reorder_fields(fields);
    }

    let name = args.name.clone().unwrap_or_else(|| source.name.clone());
    store.set_form_name(name.clone());
    let issues = lint_fields(&store.current().fields);
    let form = store.save_form(&name)?;

    let ui_ctx = ctx.ui_context(args.json);
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&form_json(&form)?)?);
    } else if !ctx.quiet() {
        let field_count = form.fields.len().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Saved edited form",
                &[
                    ("ID", &form.id),
                    ("Name", &form.name),
                    ("Fields", &field_count),
                    ("Source", &source.id),
                ],
            ),
        );
    }
    print_issues(&ui_ctx, &issues);
    Ok(())
}

/// Move the referenced field to a 1-based `position`, clamped to the end.
fn move_field(fields: &mut Vec<FormField>, reference: &str, position: usize) -> anyhow::Result<()> {
    let id = resolve_field(fields, reference)?.id.clone();
    let from = fields
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| anyhow::anyhow!("Field '{}' not found", reference))?;
    let field = fields.remove(from);
    let to = (position - 1).min(fields.len());
    fields.insert(to, field);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{FieldType, NewField};

    fn fields() -> Vec<FormField> {
        ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, label)| NewField::new(FieldType::Text, *label).into_field(format!("id-{}", i)))
            .collect()
    }

    fn labels(fields: &[FormField]) -> Vec<&str> {
        fields.iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn test_move_field_to_front() {
        let mut fields = fields();
        move_field(&mut fields, "C", 1).unwrap();
        assert_eq!(labels(&fields), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_move_field_past_end_clamps() {
        let mut fields = fields();
        move_field(&mut fields, "a", 10).unwrap();
        assert_eq!(labels(&fields), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_unknown_field_fails() {
        let mut fields = fields();
        assert!(move_field(&mut fields, "Z", 1).is_err());
    }
}
