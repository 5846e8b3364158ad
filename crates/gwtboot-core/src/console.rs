//! Coloured status output

use colored::Colorize;

const RULE: &str = "===================================";

pub fn info(message: impl AsRef<str>) {
    println!("{}", message.as_ref().blue());
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{}", message.as_ref().yellow().bold());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{}", format!("Error: {}", message.as_ref()).red());
}

pub fn plain(message: impl AsRef<str>) {
    println!("{}", message.as_ref());
}

pub fn blank() {
    println!();
}

/// A `  - entry` list line
pub fn item(entry: impl std::fmt::Display) {
    println!("  - {}", entry);
}

/// Three-line title block used at the start of every command
pub fn banner(title: &str) {
    info(RULE);
    info(title);
    info(RULE);
    blank();
}

/// Closing block for a successful command
pub fn success_banner(title: &str) {
    blank();
    success(RULE);
    success(title);
    success(RULE);
    blank();
}
