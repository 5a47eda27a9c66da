// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Provision and rotate storefront admin credentials", long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Database URL
    #[arg(long, short, env = "DATABASE_URL", global = true)]
    pub db: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: CliCommand,
}
