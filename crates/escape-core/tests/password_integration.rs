//! Solved-condition checks over rule sets of different sizes.

use escape_core::password::rules::{self, digit_sum};
use escape_core::{GameContext, PasswordPuzzle, PasswordRule, RuleStatus};

fn ends_with_bang(candidate: &str, _: &GameContext) -> bool {
    candidate.ends_with('!')
}

fn starts_upper(candidate: &str, _: &GameContext) -> bool {
    candidate.chars().next().is_some_and(char::is_uppercase)
}

fn no_spaces(candidate: &str, _: &GameContext) -> bool {
    !candidate.contains(' ')
}

fn mentions_session_tail(candidate: &str, context: &GameContext) -> bool {
    let id = context.session_id();
    let tail = &id[id.len().saturating_sub(2)..];
    candidate.contains(tail)
}

fn ten_rules() -> Vec<PasswordRule> {
    let mut set = rules::standard_rules();
    set.push(PasswordRule::new(8, "Bang", "Ends with '!'", ends_with_bang));
    set.push(PasswordRule::new(9, "Capital", "Starts upper-case", starts_upper));
    set.push(PasswordRule::new(10, "Tight", "No spaces", no_spaces));
    set
}

fn solved_after(puzzle: &mut PasswordPuzzle, candidate: &str, context: &GameContext) -> bool {
    let statuses = puzzle.evaluate(candidate, context);
    let all_valid = statuses.values().all(|s| *s == RuleStatus::Valid);
    assert_eq!(puzzle.is_solved(), all_valid);
    all_valid
}

#[test]
fn single_checksum_rule() {
    let context = GameContext::new("s-1", 15);
    let mut puzzle = PasswordPuzzle::new(vec![PasswordRule::new(
        1,
        "Checksum",
        "Digits add up",
        rules::digits_sum_to_required,
    )])
    .unwrap();

    assert!(solved_after(&mut puzzle, "78", &context));
    assert!(!solved_after(&mut puzzle, "79", &context));
    assert_eq!(digit_sum("a7b8"), 15);
}

#[test]
fn three_rules() {
    let context = GameContext::new("s-3", 6);
    let mut puzzle = PasswordPuzzle::new(vec![
        PasswordRule::new(1, "Length", "", rules::min_length),
        PasswordRule::new(2, "Checksum", "", rules::digits_sum_to_required),
        PasswordRule::new(3, "Keyword", "", rules::has_keyword),
    ])
    .unwrap();

    assert!(solved_after(&mut puzzle, "firewall123", &context));
    assert!(solved_after(&mut puzzle, "  FIRÉWALL 015", &context));
    assert!(!solved_after(&mut puzzle, "firewall124", &context));
    assert!(!solved_after(&mut puzzle, "fw123", &context));
}

#[test]
fn ten_rules_including_checksum() {
    let context = GameContext::new("s-10", 20);
    let mut puzzle = PasswordPuzzle::new(ten_rules()).unwrap();
    assert_eq!(puzzle.rules().len(), 10);

    assert!(solved_after(&mut puzzle, "Firewall#992!", &context));

    let statuses = puzzle.evaluate("firewall#992!", &context);
    assert_eq!(statuses[&3], RuleStatus::Invalid);
    assert_eq!(statuses[&9], RuleStatus::Invalid);
    assert!(!puzzle.is_solved());
}

#[test]
fn session_id_can_drive_a_rule() {
    let context = GameContext::new("room-42", 0);
    let puzzle = PasswordPuzzle::new(vec![PasswordRule::new(
        1,
        "Tail",
        "Contains the last two characters of the session id",
        mentions_session_tail,
    )])
    .unwrap();
    assert_eq!(puzzle.check("x42x", &context)[&1], RuleStatus::Valid);
    assert_eq!(puzzle.check("x24x", &context)[&1], RuleStatus::Invalid);
}

#[test]
fn rapid_reevaluation_is_stable() {
    let context = GameContext::new("s", 9);
    let mut puzzle = PasswordPuzzle::new(rules::standard_rules()).unwrap();
    let mut typed = String::new();
    let target = "Firewall!9";
    for c in target.chars() {
        typed.push(c);
        let a = puzzle.evaluate(&typed, &context);
        let b = puzzle.evaluate(&typed, &context);
        assert_eq!(a, b);
    }
    assert!(puzzle.is_solved());
}
