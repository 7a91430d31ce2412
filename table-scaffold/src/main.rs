//! table-scaffold CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::process::ExitCode;

use clap::Parser;
use commands::GenerateCommand;
use console::style;
use table_scaffold::{observability, ScaffoldError};

#[derive(Parser)]
#[command(name = "table-scaffold")]
#[command(version)]
#[command(about = "Scaffold a CRUD web-service project from a relational schema", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    generate: GenerateCommand,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init(cli.verbose) {
        eprintln!("{} {e:#}", style("warning:").yellow().bold());
    }

    match cli.generate.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print a fatal error as one diagnostic line
fn report(err: &anyhow::Error) {
    let hint = match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::DestinationNotEmpty { .. }) => ". Please remove it before proceeding.",
        _ => "",
    };
    eprintln!("{} {err:#}{hint}", style("error:").red().bold());
}
