use std::time::Duration;

use clap::Args;
use escape_core::{CountdownTask, Event, GameConfig};

use super::{print_json, CliResult};

#[derive(Args)]
pub struct ClockArgs {
    /// Budget in seconds (overrides clock.budget_secs)
    #[arg(long)]
    budget: Option<u64>,
    /// Stop after this many ticks (default: budget + 1)
    #[arg(long)]
    ticks: Option<u64>,
    /// Tick every millisecond instead of every second
    #[arg(long)]
    fast: bool,
}

pub fn run(args: ClockArgs, cfg: &GameConfig) -> CliResult {
    let budget = args.budget.unwrap_or(cfg.clock.budget_secs);
    let ticks = args.ticks.unwrap_or(budget.saturating_add(1));
    let period = if args.fast {
        Duration::from_millis(1)
    } else {
        Duration::from_secs(1)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let mut task = CountdownTask::spawn(budget, period)?;
        let mut seen = 0;
        while seen < ticks {
            let Some(event) = task.next_event().await else {
                break;
            };
            if matches!(event, Event::ClockTicked { .. }) {
                seen += 1;
            }
            print_json(&event)?;
        }
        task.stop().await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
