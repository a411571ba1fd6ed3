use clap::Parser;
use vehicle_valuation::cli::{Cli, Commands};
use vehicle_valuation::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {:#}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    vehicle_valuation::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Estimate(args) => {
            tracing::info!(make = %args.make, model = %args.model, "Running estimate");
            args.execute(&config)?;
        }
        Commands::Batch(args) => {
            tracing::info!(input = %args.input.display(), "Running batch estimate");
            args.execute(&config)?;
        }
        Commands::Reference(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Telemetry: level={}, format={:?}",
                config.telemetry.log_level, config.telemetry.log_format
            );
            match &config.valuation.reference_data {
                Some(path) => println!("  Reference data: {}", path.display()),
                None => println!("  Reference data: built-in"),
            }
        }
    }

    Ok(())
}
