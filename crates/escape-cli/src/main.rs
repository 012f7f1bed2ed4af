use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "escape-cli", version, about = "Escape game puzzle host")]
struct Cli {
    /// Game configuration file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the session countdown
    Clock(commands::clock::ClockArgs),
    /// Simulate a firewall calibration attempt
    Firewall(commands::firewall::FirewallArgs),
    /// Classify a tilt reading
    Orientation(commands::orientation::OrientationArgs),
    /// Check a password candidate against the rules
    Password(commands::password::PasswordArgs),
    /// Inspect the game configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = commands::load_config(cli.config.as_deref()).and_then(|cfg| match cli.command {
        Commands::Clock(args) => commands::clock::run(args, &cfg),
        Commands::Firewall(args) => commands::firewall::run(args, &cfg),
        Commands::Orientation(args) => commands::orientation::run(args, &cfg),
        Commands::Password(args) => commands::password::run(args, &cfg),
        Commands::Config { action } => commands::config::run(action, &cfg),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
