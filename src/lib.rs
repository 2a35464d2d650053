//! memo - list and search Apple Notes folders, notes and reminders

pub mod cli;
pub mod domain;
pub mod infra;
pub mod provider;
pub mod script;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::{Config, Settings},
    handlers::{handle_notes, handle_preview, handle_rem},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let settings = Settings::from_env(&config, cli.backend.as_deref(), cli.no_cache);
    init_tracing(cli.verbose, settings.timing);

    tracing::debug!(backend = %settings.backend, db = %settings.db_path.display(), "resolved settings");

    match &cli.command {
        Command::Notes(args) => handle_notes(args, &settings),
        Command::Rem(args) => handle_rem(args, &settings),
        Command::Preview(args) => handle_preview(args),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "memo", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` replaces the default filter.
fn init_tracing(verbose: u8, timing: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = vec![if verbose > 0 { "memo=debug" } else { "warn" }];
        if timing {
            directives.push("memo::timing=info");
        }
        EnvFilter::new(directives.join(","))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .try_init();
}
