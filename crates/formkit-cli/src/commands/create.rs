use std::path::Path;

use formkit_core::lint_fields;

use crate::app::AppContext;
use crate::cli::CreateArgs;
use crate::helpers::read_draft;
use crate::output::{form_json, print_issues};
use crate::ui::{print, receipt};

pub fn handle_create(ctx: &AppContext, args: &CreateArgs) -> anyhow::Result<()> {
    let draft = read_draft(Path::new(&args.draft))?;
    let name = args.name.clone().unwrap_or_else(|| draft.name.clone());
    if name.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "Form name is empty\nHint: Pass --name or set \"name\" in the draft."
        ));
    }

    let mut store = ctx.open_store()?;
    draft.apply(&mut store)?;
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
                "Saved form",
                &[
                    ("ID", &form.id),
                    ("Name", &form.name),
                    ("Fields", &field_count),
                ],
            ),
        );
    }
    print_issues(&ui_ctx, &issues);
    Ok(())
}
