use clap::Args;
use escape_core::password::rules::standard_rules;
use escape_core::{GameConfig, GameContext, PasswordPuzzle};
use serde_json::json;

use super::{print_json, CliResult};

#[derive(Args)]
pub struct PasswordArgs {
    /// Candidate password
    candidate: String,
    /// Seed for the generated session context
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Use this checksum instead of a generated one
    #[arg(long)]
    required_sum: Option<u32>,
}

pub fn run(args: PasswordArgs, cfg: &GameConfig) -> CliResult {
    let context = match args.required_sum {
        Some(sum) => GameContext::new(format!("cli-{}", args.seed), sum),
        None => GameContext::generate(
            args.seed,
            cfg.password.min_required_sum,
            cfg.password.max_required_sum,
        )?,
    };

    let mut puzzle = PasswordPuzzle::new(standard_rules())?;
    puzzle.evaluate(&args.candidate, &context);

    print_json(&json!({
        "session_id": context.session_id(),
        "required_sum": context.required_sum(),
        "solved": puzzle.is_solved(),
        "rules": puzzle.report(&args.candidate, &context),
    }))?;
    if let Some(event) = puzzle.solved_event(&context) {
        print_json(&event)?;
    }
    Ok(())
}
