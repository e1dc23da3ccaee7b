//! CLI interface for real-discount
//!
//! Provides subcommands for:
//! - `assess`: Compute the reference price and real discount of a history file
//! - `config`: Show the effective configuration

mod assess;

pub use assess::AssessArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "real-discount")]
#[command(about = "Check advertised discounts against the EU 30-day reference price")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a price history file
    Assess(AssessArgs),
    /// Show the effective configuration
    Config,
}
