use clap::Parser;
use real_discount::cli::{Cli, Commands};
use real_discount::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::example()?
        }
    };

    // Initialize telemetry
    real_discount::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Assess(args) => {
            args.execute(&config.engine)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
