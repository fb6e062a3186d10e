use formkit_core::FormSession;

use crate::app::AppContext;
use crate::cli::FillArgs;
use crate::helpers::{parse_assignment, parse_date, resolve_field};
use crate::output::{fill_json, print_fill};
use crate::ui::{header, print};

pub fn handle_fill(ctx: &AppContext, args: &FillArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let form = store.find_saved(&args.id)?;

    let today = match args.today.as_deref() {
        Some(value) => parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };
    let mut session = FormSession::with_today(form.fields.clone(), today);

    for assignment in &args.values {
        let (reference, raw) = parse_assignment(assignment)?;
        let id = resolve_field(session.fields(), reference)?.id.clone();
        match session.set_input(&id, raw) {
            Ok(_) => {}
            Err(e) if e.is_dependency_cycle() => {
                tracing::warn!(field = %id, "derived fields loop; values left partially computed");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let errors = session.validate();
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&fill_json(&session, &errors))?
        );
    } else {
        if ui_ctx.mode.is_pretty() && !ctx.quiet() {
            print(&ui_ctx, &header(&ui_ctx, "fill", Some(&form.name)));
        }
        print_fill(&ui_ctx, &session, &errors);
    }

    if let Some(cycle) = session.cycle() {
        return Err(anyhow::anyhow!(
            "Derived fields form a cycle: {}",
            cycle.join(" -> ")
        ));
    }
    if !errors.is_empty() {
        return Err(anyhow::anyhow!(
            "{} field(s) failed validation",
            errors.len()
        ));
    }
    Ok(())
}
