use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::form_summary_json;
use crate::ui::{format_datetime, header, print, short_id, single_line, table, truncate, Column};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let forms = store.saved_forms();
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        let json_output: Vec<_> = forms.iter().map(form_summary_json).collect();
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    if forms.is_empty() {
        if !ctx.quiet() {
            println!("No forms found.");
        }
        return Ok(());
    }

    let pretty = ui_ctx.mode.is_pretty();
    if pretty && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "list", Some(&forms.len().to_string())));
    }
    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Fields"),
        Column::new("Created"),
    ];
    let rows: Vec<Vec<String>> = forms
        .iter()
        .map(|form| {
            vec![
                if pretty { short_id(&form.id) } else { form.id.clone() },
                if pretty { truncate(&single_line(&form.name), 40) } else { single_line(&form.name) },
                form.fields.len().to_string(),
                format_datetime(&form.created_at, pretty),
            ]
        })
        .collect();
    print(&ui_ctx, &table(&ui_ctx, &columns, &rows));
    Ok(())
}
