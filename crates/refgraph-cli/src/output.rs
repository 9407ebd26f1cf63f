//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print the requested view itself (always prints).
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Get a colored branch name with current indicator.
#[must_use]
pub fn branch_name(name: &str, is_current: bool) -> String {
    if is_current {
        format!("{} {}", "▶".cyan(), name.cyan().bold())
    } else {
        format!("  {name}")
    }
}

/// Reference names decorating a commit row, e.g. `(main, origin/main)`.
#[must_use]
pub fn decorations(names: &[String], head: Option<&str>) -> String {
    if names.is_empty() {
        return String::new();
    }

    let names: Vec<String> = names
        .iter()
        .map(|name| {
            if head == Some(name.as_str()) {
                name.cyan().bold().to_string()
            } else {
                name.green().to_string()
            }
        })
        .collect();
    format!("({}) ", names.join(", "))
}
