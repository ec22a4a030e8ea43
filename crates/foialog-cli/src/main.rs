//! foialog CLI - FOIA request log normalizer.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            file,
            output,
            format,
            report,
        } => commands::normalize::run(file, output, format, report, cli.verbose),

        Commands::Check { file, json } => commands::check::run(file, json, cli.verbose),

        Commands::Inspect { file, column } => commands::inspect::run(file, column, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
