//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: variable names, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ spread 4 variables`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ re-run with --yes`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold header.
fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  renamed:  4`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value.to_string()).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Format a variable name in cyan.
pub fn name(n: &str) -> String {
    if colors_enabled() {
        style(n).cyan().to_string()
    } else {
        n.to_string()
    }
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
