//! Terminal output helpers.
//!
//! Reports go to stdout, errors to stderr. Styling is dropped when
//! `NO_COLOR` is set.

use console::Style;
use std::fmt::Display;

use crate::core::domain::Outcome;

const RULE_WIDTH: usize = 56;

fn plain() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

fn paint(style: Style, text: impl Display) -> String {
    if plain() {
        text.to_string()
    } else {
        style.apply_to(text).to_string()
    }
}

/// Style for an outcome: green when granted, yellow when denied, red otherwise.
fn outcome_style(outcome: &Outcome) -> Style {
    match outcome {
        Outcome::Granted => Style::new().green().bold(),
        Outcome::Denied(_) => Style::new().yellow().bold(),
        _ => Style::new().red().bold(),
    }
}

/// `✓ msg` on stdout.
pub fn success(msg: &str) {
    println!("{} {}", paint(Style::new().green(), "✓"), msg);
}

/// `✗ msg` on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(Style::new().red(), "✗"), msg);
}

/// `→ msg` on stdout, for the next thing to try.
pub fn hint(msg: &str) {
    let cyan = Style::new().cyan();
    println!("{} {}", paint(cyan.clone(), "→"), paint(cyan, msg));
}

/// Indented `label  value` line.
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(Style::new().dim(), label),
        paint(Style::new().bold(), value)
    );
}

/// Indented label with the outcome colored by class.
pub fn outcome(label: &str, outcome: &Outcome) {
    println!(
        "  {}  {}",
        paint(Style::new().dim(), label),
        paint(outcome_style(outcome), outcome)
    );
}

/// Bold title over a dimmed rule.
pub fn section(title: &str) {
    println!("{}", paint(Style::new().bold(), title));
    println!("{}", paint(Style::new().dim(), "─".repeat(RULE_WIDTH)));
}
