use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::{self, AppContext, run::RunArgs, schema::SchemaArgs};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "questionnaire",
    about = "Step-by-step offer questionnaire in the terminal",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Locale to start in (falls back to LC_ALL, LC_MESSAGES, LANG, then the OS locale)
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    locale: Option<String>,

    /// Wizard config file (defaults to questionnaire.toml in the user config dir)
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log transitions to stderr
    #[arg(long = "verbose", short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the questionnaire interactively or from an answers file
    Run(RunArgs),
    /// Validate the config, schema and locale catalogs
    Check,
    /// List the declared locales
    Locales,
    /// Print the JSON schema of schema or catalog files
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Commands::Schema(args) = &cli.command {
        return cmd::schema::run(args);
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.locale.as_deref())?;
    match cli.command {
        Commands::Run(args) => cmd::run::run(args, &ctx),
        Commands::Check => cmd::check::run(&ctx),
        Commands::Locales => cmd::locales::run(&ctx),
        Commands::Schema(_) => Ok(()),
    }
}
