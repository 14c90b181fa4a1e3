//! Terminal tables for entropy and ranking results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{EntropyReport, Ranking, SkippedColumn};

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{:.4}", value)).set_alignment(CellAlignment::Right)
}

/// Colour for a normalized score in [0, 1]
fn strength_color(score: f64) -> Color {
    if score >= 0.75 {
        Color::Green
    } else if score >= 0.4 {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Build the per-column entropy table, limited to the first `top` rows if given
pub fn entropy_table(report: &EntropyReport, top: Option<usize>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&[
        "#", "Column", "Kind", "Obs", "Missing", "Distinct", "Entropy", "Max", "Normalized",
    ]));

    let limit = top.unwrap_or(report.columns.len());
    for (i, col) in report.columns.iter().take(limit).enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&col.name),
            Cell::new(col.kind),
            Cell::new(col.summary.observations),
            Cell::new(col.missing),
            Cell::new(col.summary.distinct),
            number(col.summary.entropy).fg(strength_color(col.summary.normalized)),
            number(col.summary.max_entropy),
            number(col.summary.normalized),
        ]);
    }

    table
}

/// Build the information gain ranking table, limited to the first `top` rows if given
pub fn ranking_table(ranking: &Ranking, top: Option<usize>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&[
        "Rank",
        "Predictor",
        "Partitions",
        "H(target | predictor)",
        "Information gain",
    ]));

    let limit = top.unwrap_or(ranking.records.len());
    for (i, record) in ranking.records.iter().take(limit).enumerate() {
        let share = if ranking.overall_entropy > 0.0 {
            record.information_gain / ranking.overall_entropy
        } else {
            0.0
        };

        let mut name = Cell::new(&record.predictor);
        if i == 0 {
            name = name.add_attribute(Attribute::Bold);
        }

        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(record.partitions),
            number(record.conditional_entropy),
            number(record.information_gain).fg(strength_color(share)),
        ]);
    }

    table
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn print_skipped(skipped: &[SkippedColumn]) {
    if skipped.is_empty() {
        return;
    }

    println!();
    println!(
        "      {} {}:",
        style("Skipped columns").yellow(),
        style(format!("({})", skipped.len())).dim()
    );
    for column in skipped {
        println!(
            "        {} {} {}",
            style("•").dim(),
            column.name,
            style(format!("- {}", column.reason)).dim()
        );
    }
}

/// Display the entropy report
pub fn display_entropy_report(report: &EntropyReport, top: Option<usize>) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("COLUMN ENTROPY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&entropy_table(report, top));
    print_skipped(&report.skipped);
}

/// Display the information gain ranking
pub fn display_ranking(ranking: &Ranking, top: Option<usize>) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("INFORMATION GAIN RANKING").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "      Target {} · {} records · H = {:.4} bits",
        style(&ranking.target).cyan().bold(),
        ranking.records_used,
        ranking.overall_entropy
    );
    println!();

    print_indented(&ranking_table(ranking, top));

    if let Some(best) = ranking.most_informative() {
        println!();
        println!(
            "      Most informative: {} {}",
            style(&best.predictor).green().bold(),
            style(format!("({:.4} bits)", best.information_gain)).dim()
        );
    }

    print_skipped(&ranking.skipped);
}
