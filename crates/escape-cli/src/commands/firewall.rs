use clap::Args;
use escape_core::{FirewallPuzzle, GameConfig};
use serde::Serialize;

use super::{print_json, CliResult};

#[derive(Args)]
pub struct FirewallArgs {
    /// One character per tick: '1' holds the blow action, '0' releases it
    #[arg(long, default_value = "111111111111111111111111111111")]
    blow_pattern: String,
    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

#[derive(Serialize)]
struct TickLine<'a> {
    tick: usize,
    #[serde(flatten)]
    state: &'a escape_core::FirewallState,
}

pub fn run(args: FirewallArgs, cfg: &GameConfig) -> CliResult {
    let mut puzzle = FirewallPuzzle::new(cfg.firewall.clone())?;
    if let Some(event) = puzzle.begin_calibration() {
        print_json(&event)?;
    }
    if let Some(event) = puzzle.complete_calibration() {
        print_json(&event)?;
    }

    for (tick, c) in args.blow_pattern.chars().enumerate() {
        match c {
            '1' => puzzle.set_blowing(true),
            '0' => puzzle.set_blowing(false),
            other => return Err(format!("invalid pattern character '{other}'").into()),
        }
        let event = puzzle.tick(args.tick_ms);
        print_json(&TickLine {
            tick,
            state: puzzle.state(),
        })?;
        if let Some(event) = event {
            print_json(&event)?;
            break;
        }
    }
    Ok(())
}
