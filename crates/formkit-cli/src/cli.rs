use clap::{Args, Parser, Subcommand, ValueEnum};

use formkit_core::VERSION;

/// Formkit - build forms from typed fields, fill them in, and validate them
#[derive(Parser)]
#[command(name = "formkit")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the form store (SQLite file or directory)
    #[arg(short, long, global = true, env = "FORMKIT_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Storage backend for saved forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Single SQLite database file
    Sqlite,
    /// Directory with one JSON file per key
    Files,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file pointing at a form store
    Init(InitArgs),

    /// Build a form from a draft file and save it
    Create(CreateArgs),

    /// List saved forms
    List(ListArgs),

    /// Show a saved form's fields
    Show(ShowArgs),

    /// Delete a saved form
    Delete(DeleteArgs),

    /// Load a saved form, change it, and save it as a new form
    Edit(EditArgs),

    /// Fill in a saved form and validate it
    Fill(FillArgs),

    /// Verify the stored forms and report configuration problems
    Check,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = BackendArg::Sqlite)]
    pub backend: BackendArg,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `create` command
#[derive(Args)]
pub struct CreateArgs {
    /// Draft file (JSON or TOML) describing the fields
    #[arg(value_name = "DRAFT")]
    pub draft: String,

    /// Form name (overrides the draft's name)
    #[arg(long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Form ID (full id or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Form ID (full id or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Form ID (full id or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New form name
    #[arg(long)]
    pub name: Option<String>,

    /// Remove a field (by id or label)
    #[arg(long, value_name = "FIELD")]
    pub remove: Vec<String>,

    /// Move a field to a 1-based position (FIELD=POS)
    #[arg(long = "move", value_name = "FIELD=POS")]
    pub moves: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fill` command
#[derive(Args)]
pub struct FillArgs {
    /// Form ID (full id or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Set a field value (FIELD=VALUE, field by id or label)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub values: Vec<String>,

    /// Date used for age computations (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
