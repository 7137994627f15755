//! VCA configuration upgrade CLI
//!
//! Reconciles the old default, user and new default configuration documents
//! and applies the result through `vcactl`.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, HELP_TEXT, Request};
use error::{CliError, Result};

/// Exit code after an operator interrupt
const EXIT_INTERRUPTED: i32 = 1;

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(e) => {
            report_error(&e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose || cli.debug_requested())?;
    install_interrupt_handler()?;

    match cli.request()? {
        Request::Help => {
            println!("{}", HELP_TEXT);
            Ok(())
        }
        Request::Merge(args) => commands::run_merge(&args),
    }
}

fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCaught SIGINT! Aborting..");
        std::process::exit(EXIT_INTERRUPTED);
    })
    .map_err(|e| CliError::user(format!("Failed to install interrupt handler: {}", e)))
}

fn report_error(err: &CliError) {
    eprintln!("{}: {}", "error".red().bold(), err);
    for hint in err.recovery_hints() {
        eprintln!("\t{}", hint);
    }
}
