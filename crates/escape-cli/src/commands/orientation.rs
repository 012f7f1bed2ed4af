use clap::Args;
use escape_core::orientation::StaticPermission;
use escape_core::{GameConfig, OrientationData, OrientationPuzzle, PermissionOutcome};
use serde_json::json;

use super::{print_json, CliResult};

#[derive(Args)]
pub struct OrientationArgs {
    /// Front-to-back tilt in degrees
    #[arg(long, allow_hyphen_values = true)]
    beta: Option<f64>,
    /// Left-to-right tilt in degrees
    #[arg(long, allow_hyphen_values = true)]
    gamma: Option<f64>,
    /// Simulate a denied sensor permission
    #[arg(long)]
    deny: bool,
}

pub fn run(args: OrientationArgs, cfg: &GameConfig) -> CliResult {
    let mut puzzle = OrientationPuzzle::new(cfg.orientation)?;
    let mut provider = StaticPermission(if args.deny {
        PermissionOutcome::Denied {
            reason: "denied from the command line".into(),
        }
    } else {
        PermissionOutcome::Granted
    });

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    if let Some(event) = runtime.block_on(puzzle.request_permission(&mut provider)) {
        print_json(&event)?;
    }

    let direction = puzzle.submit_sample(OrientationData {
        beta: args.beta,
        gamma: args.gamma,
        ..OrientationData::default()
    });
    print_json(&json!({
        "direction": direction,
        "state": puzzle.state(),
    }))
}
