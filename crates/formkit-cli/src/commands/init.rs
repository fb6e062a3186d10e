use std::path::PathBuf;

use crate::app::{open_store, resolve_config_path, AppContext, StoreLocation};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, Backend, FormkitConfig};
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ));
    }

    let backend = Backend::from(args.backend);
    let store_path = match ctx.cli().store.as_deref() {
        Some(path) => PathBuf::from(path),
        None => default_store_path(backend)?,
    };
    let location = StoreLocation {
        backend,
        path: store_path.clone(),
    };
    let store = open_store(&location)?;

    write_config(&config_path, &FormkitConfig::new(backend, store_path))?;
    tracing::debug!(config = %config_path.display(), "wrote config");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let config_display = config_path.display().to_string();
        let store_display = location.path.display().to_string();
        let saved = store.saved_forms().len().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Initialized form store",
                &[
                    ("Config", &config_display),
                    ("Store", &store_display),
                    ("Backend", backend.as_str()),
                    ("Saved forms", &saved),
                ],
            ),
        );
        print(&ui_ctx, &hint(&ui_ctx, "formkit create <DRAFT>"));
    }
    Ok(())
}
