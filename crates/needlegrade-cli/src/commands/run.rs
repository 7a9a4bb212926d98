//! The `needlegrade run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use needlegrade_core::engine::{GradeEngine, ProgressReporter};
use needlegrade_core::parser::{load_config, JsonlSource};
use needlegrade_core::report::BatchReport;
use needlegrade_core::score::RecordScore;

/// Console progress reporter: skipped records and the batch footer only;
/// per-record output would swamp the terminal on real batches.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_record_graded(&self, _: usize, _: &RecordScore) {}

    fn on_record_skipped(&self, index: usize, error: &str) {
        eprintln!("  Skipped record {index}: {error}");
    }

    fn on_batch_complete(&self, total: usize, graded: usize, skipped: usize, elapsed: Duration) {
        eprintln!(
            "\nGraded {graded}/{total} records, {skipped} skipped ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    records: PathBuf,
    config_path: Option<PathBuf>,
    sequence_length: Option<u32>,
    parallelism: Option<usize>,
    output: PathBuf,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(len) = sequence_length {
        config.sequence_length = len;
    }
    if let Some(par) = parallelism {
        anyhow::ensure!(par >= 1, "parallelism must be at least 1");
        config.parallelism = par;
    }

    let source = JsonlSource::new(&records);
    let engine = GradeEngine::new(config);

    eprintln!("needlegrade v0.1.0 — grading {}", records.display());
    let report = engine.run(&source, &ConsoleReporter).await?;

    print_summary(&report);

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = output.join(format!("report-{timestamp}.json"));
    report.save_json(&path)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

fn print_summary(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Records",
        "Mean acc",
        "Median acc",
        "Min",
        "Max",
        "Misorder keys",
        "Missing keys",
        "Hallucinations",
    ]);
    table.add_row(vec![
        Cell::new(report.graded_records),
        Cell::new(format!("{:.2}%", report.accuracy.mean)),
        Cell::new(format!("{:.2}%", report.accuracy.median)),
        Cell::new(format!("{:.2}%", report.accuracy.min)),
        Cell::new(format!("{:.2}%", report.accuracy.max)),
        Cell::new(report.misorder.len()),
        Cell::new(report.missing.len()),
        Cell::new(
            report
                .hallucination
                .iter()
                .map(|r| r.frequency)
                .sum::<u64>(),
        ),
    ]);
    eprintln!("\n{table}");

    print_top_positions(&report.misorder, "Most misordered positions");
    print_top_positions(&report.missing, "Most missed positions");
    print_top_intervals(report);
}

fn print_top_positions(rows: &[needlegrade_core::aggregate::PositionRow], title: &str) {
    if rows.is_empty() {
        return;
    }
    let mut sorted: Vec<_> = rows.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let mut table = Table::new();
    table.set_header(vec!["Position", "Frequency", "Probability"]);
    for row in sorted.iter().take(5) {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.frequency),
            Cell::new(format!("{:.2}%", row.probability)),
        ]);
    }
    eprintln!("\n{title}:\n{table}");
}

fn print_top_intervals(report: &BatchReport) {
    if report.hallucination.is_empty() {
        return;
    }
    let mut sorted = report.hallucination.clone();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let mut table = Table::new();
    table.set_header(vec!["Interval", "Frequency", "Probability"]);
    for row in sorted.iter().take(5) {
        table.add_row(vec![
            Cell::new(format!("({}, {})", row.from, row.to)),
            Cell::new(row.frequency),
            Cell::new(format!("{:.2}%", row.probability)),
        ]);
    }
    eprintln!("\nMost frequent hallucination intervals:\n{table}");
}
