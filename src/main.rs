//! track-id CLI entry point

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use track_id::cli::{Cli, Command};
use track_id::core::inspect;
use track_id::core::search::SearchClient;
use track_id::display;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Search {
            query,
            source,
            limit,
            json,
        } => {
            let results = SearchClient::new(limit).search(source.into(), &query)?;
            if json {
                display::print_search_json(&mut out, &results)?;
            } else {
                display::print_search_results(&mut out, &results)?;
            }
        }
        Command::Info { file, json, raw } => {
            let report = inspect(&file)?;
            if json {
                display::print_report_json(&mut out, &report)?;
            } else {
                display::print_report(&mut out, &report, raw)?;
            }
        }
        Command::Fields => display::print_fields(&mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
