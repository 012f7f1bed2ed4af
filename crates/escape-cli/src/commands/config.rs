use clap::Subcommand;
use escape_core::GameConfig;

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "firewall.stability_threshold_ms")
        key: String,
    },
    /// Print the effective configuration as TOML
    Show,
}

pub fn run(action: ConfigAction, cfg: &GameConfig) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            println!("{}", cfg.get(&key)?);
        }
        ConfigAction::Show => {
            print!("{}", cfg.to_toml_string()?);
        }
    }
    Ok(())
}
