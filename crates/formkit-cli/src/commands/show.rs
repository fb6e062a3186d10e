use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{form_json, print_form};
use crate::ui::{header, print};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let form = store.find_saved(&args.id)?;
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&form_json(form)?)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "show", Some(&form.name)));
    }
    print_form(&ui_ctx, form);
    Ok(())
}
