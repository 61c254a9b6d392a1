mod commands;
mod config;
mod document;
mod error;
mod logger;
mod runner;
mod writer;
use crate::commands::Commands;
use crate::error::Error;
use crate::logger::Logger;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print structured JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Derive a runner from the command and run it
fn run(command: &impl Runnable, writer: &Writer) -> Result<(), Error> {
    command.runner(writer).run()
}

fn main() -> ExitCode {
    Logger::init();
    let cli = Cli::parse();
    let writer = Writer::new(cli.json);

    // Match all commands here, in one place
    let result = match &cli.command {
        Commands::Apply(cmd) => run(cmd, &writer),
        Commands::Plan(cmd) => run(cmd, &writer),
    };

    let Err(error) = result else {
        return ExitCode::SUCCESS;
    };

    let message = format!("\n{}\n{error}\n", console::style("Error").red().bold());

    if writer.error(&message).is_err() {
        log::error!("Failed to print error: {error:?}");
    }

    ExitCode::FAILURE
}
