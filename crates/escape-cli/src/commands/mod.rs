use std::path::Path;

use escape_core::GameConfig;

pub mod clock;
pub mod config;
pub mod firewall;
pub mod orientation;
pub mod password;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config(path: Option<&Path>) -> Result<GameConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => {
            tracing::debug!("no --config given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

/// Print one JSON value per line so output can be piped.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
