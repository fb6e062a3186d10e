use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::ui::{badge, print, Badge, OutputMode};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let form = store.find_saved(&args.id)?.clone();
    let ui_ctx = ctx.ui_context(false);

    if !args.force {
        if !std::io::stdin().is_terminal() {
            return Err(anyhow::anyhow!(
                "Refusing to delete without confirmation\nHint: Pass --force to delete non-interactively."
            ));
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete form '{}' ({})?", form.name, form.id))
            .default(false)
            .interact()?;

        if !confirmed {
            if !ctx.quiet() {
                match ui_ctx.mode {
                    OutputMode::Pretty => {
                        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Cancelled"));
                    }
                    OutputMode::Plain | OutputMode::Json => {
                        println!("status=cancelled");
                    }
                }
            }
            return Ok(());
        }
    }

    store.delete_saved(&form.id)?;

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                print(
                    &ui_ctx,
                    &badge(&ui_ctx, Badge::Ok, &format!("Deleted form '{}'", form.name)),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", form.id);
            }
        }
    }
    Ok(())
}
