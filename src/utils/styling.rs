//! Terminal styling utilities

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("morphent").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Entropy and information gain for morphological variables").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Run configuration shown before an analysis starts
pub struct RunCard<'a> {
    pub input: &'a Path,
    pub target: Option<&'a str>,
    pub num_bins: usize,
    pub columns: usize,
    pub export: Option<&'a Path>,
}

/// Print configuration card
pub fn print_config(card: &RunCard) {
    let line = "─".repeat(54);

    println!("    ┌{}┐", line);
    println!("    │ {:<53}│", style("Configuration").cyan().bold());
    println!("    ├{}┤", line);
    println!(
        "    │  {}Input:   {:<41}│",
        FOLDER,
        truncate_path(card.input, 40)
    );
    if let Some(target) = card.target {
        println!(
            "    │  {}Target:  {:<41}│",
            TARGET,
            truncate_string(target, 40)
        );
    }
    println!(
        "    │  {}Columns: {:<41}│",
        CHART,
        style(card.columns).yellow()
    );
    println!(
        "    │  {}Bins:    {:<41}│",
        CHART,
        style(card.num_bins).yellow()
    );
    if let Some(export) = card.export {
        println!(
            "    │  {}Export:  {:<41}│",
            SAVE,
            truncate_path(export, 40)
        );
    }
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {}{}", WARN, style(message).yellow());
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2?}", elapsed)).dim()
    );
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    match detail {
        Some(info) => println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        ),
        None => println!("      Found {} {}", style(count).yellow().bold(), description),
    }
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!("    {}", style("Analysis complete!").green().bold());
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

/// Shorten a string from the left, keeping its tail visible
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = chars[chars.len() - keep..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_short() {
        assert_eq!(truncate_string("species", 10), "species");
    }

    #[test]
    fn test_truncate_string_long() {
        let out = truncate_string("/data/rodents/character_matrix.csv", 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.starts_with("..."));
        assert_eq!(out, "...atrix.csv");
    }
}
