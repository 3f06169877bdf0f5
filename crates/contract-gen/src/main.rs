use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    chain::{self, ChainArgs},
    hash::{self, HashArgs},
    plan::{self, PlanArgs},
};

mod commands;
mod config;
mod logging;
mod writer;

#[derive(Parser, Debug)]
#[command(name = "contract-gen", about = "Contract generation planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build generation plans for schema files.
    Plan(PlanArgs),
    /// Print the resolved inheritance chain of a service.
    Chain(ChainArgs),
    /// Print the canonical hash of a schema document.
    Hash(HashArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Plan(args) => plan::run(&args),
        Command::Chain(args) => chain::run(&args),
        Command::Hash(args) => hash::run(&args),
    }
}
