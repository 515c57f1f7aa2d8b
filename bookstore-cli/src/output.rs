//! Styled terminal output utilities.

use owo_colors::OwoColorize;

/// Width of the banner rules
pub const BANNER_WIDTH: usize = 60;

/// Width of the section underline
pub const SECTION_WIDTH: usize = 40;

/// Print the opening or closing rule
pub fn rule() {
    println!("{}", "=".repeat(BANNER_WIDTH).dimmed());
}

/// Print a banner between two rules
pub fn banner(text: &str) {
    rule();
    println!("{}", text.bold().cyan());
    rule();
}

/// Print a header/title
pub fn header(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
    println!("{}", "-".repeat(SECTION_WIDTH).dimmed());
}

/// Print a section header
pub fn section(text: &str) {
    println!();
    println!("{}", text.bold().white());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text.green());
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", "ℹ".blue().bold(), text);
}

/// Print a warning message
pub fn warn(text: &str) {
    println!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print an indented line
pub fn line(text: &str) {
    println!("   {}", text);
}

/// Print a list item
pub fn list_item(text: &str) {
    println!("   {} {}", "•".dimmed(), text);
}

/// Print a nested detail line under a list item
pub fn detail(text: &str) {
    println!("     {} {}", "-".dimmed(), text);
}

/// Print a numbered list item
pub fn numbered_item(number: u64, text: &str) {
    println!("   {} {}", format!("{}.", number).dimmed(), text);
}

/// Print a newline
pub fn newline() {
    println!();
}

/// Print dimmed text
pub fn dim(text: &str) {
    println!("{}", text.dimmed());
}

/// Format a price with two decimals, e.g. `$12.99`
pub fn price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Group the digits of a count in thousands, e.g. `4,585`
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Ask for confirmation
pub fn confirm(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} {} ", prompt, "[y/N]".dimmed());
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
