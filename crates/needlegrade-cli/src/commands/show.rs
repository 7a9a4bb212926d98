//! The `needlegrade show` command: render a saved report's tables.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use needlegrade_core::aggregate::{IntervalRow, PositionRow};
use needlegrade_core::report::BatchReport;

pub fn execute(report_path: PathBuf, kind: String) -> Result<()> {
    anyhow::ensure!(
        matches!(
            kind.as_str(),
            "correct" | "misorder" | "missing" | "hallucination" | "all"
        ),
        "invalid kind '{kind}': expected correct, misorder, missing, hallucination, or all"
    );

    let report = BatchReport::load_json(&report_path)?;

    println!(
        "Report {} — {} ({} graded, {} skipped)",
        report.id, report.source, report.graded_records, report.skipped_records
    );
    println!(
        "Accuracy: mean {:.2}%  median {:.2}%  min {:.2}%  max {:.2}%",
        report.accuracy.mean, report.accuracy.median, report.accuracy.min, report.accuracy.max
    );

    if matches!(kind.as_str(), "correct" | "all") {
        print_position_table("Correct", &report.correct);
    }
    if matches!(kind.as_str(), "misorder" | "all") {
        print_position_table("Misorder", &report.misorder);
    }
    if matches!(kind.as_str(), "missing" | "all") {
        print_position_table("Missing", &report.missing);
    }
    if matches!(kind.as_str(), "hallucination" | "all") {
        print_interval_table(&report.hallucination);
    }

    Ok(())
}

fn print_position_table(title: &str, rows: &[PositionRow]) {
    println!("\n{title}:");
    if rows.is_empty() {
        println!("  (no entries)");
        return;
    }
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let mut table = Table::new();
    table.set_header(vec!["Position", "Frequency", "Probability", "Records"]);
    for row in &sorted {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.frequency),
            Cell::new(format!("{:.2}%", row.probability)),
            Cell::new(row.total_records),
        ]);
    }
    println!("{table}");
}

fn print_interval_table(rows: &[IntervalRow]) {
    println!("\nHallucination:");
    if rows.is_empty() {
        println!("  (no entries)");
        return;
    }
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let mut table = Table::new();
    table.set_header(vec!["Interval", "Frequency", "Probability", "Records"]);
    for row in &sorted {
        table.add_row(vec![
            Cell::new(format!("({}, {})", row.from, row.to)),
            Cell::new(row.frequency),
            Cell::new(format!("{:.2}%", row.probability)),
            Cell::new(row.total_records),
        ]);
    }
    println!("{table}");
}
