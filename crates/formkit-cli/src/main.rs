//! Formkit CLI - build forms from typed fields, fill them in, and validate them
//!
//! This is the command-line interface for Formkit. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    let config_filter = ctx
        .config()
        .ok()
        .flatten()
        .and_then(|config| config.log.filter.as_deref());
    logging::init(config_filter);

    match &cli.command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Create(args) => commands::handle_create(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Edit(args) => commands::handle_edit(&ctx, args),
        Commands::Fill(args) => commands::handle_fill(&ctx, args),
        Commands::Check => commands::handle_check(&ctx),
    }
}
