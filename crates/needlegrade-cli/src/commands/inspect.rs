//! The `needlegrade inspect` command: grade one record pair and print a
//! key-level diff.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use needlegrade_core::classify::{classify, PositionLabel};
use needlegrade_core::error::Side;
use needlegrade_core::model::AnswerSet;
use needlegrade_core::parser::load_config;
use needlegrade_core::score::grade;

/// Accept either an inline JSON object or a path to a file holding one.
fn load_answer_set(arg: &str, side: Side) -> Result<AnswerSet> {
    let raw = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        std::fs::read_to_string(arg).with_context(|| format!("failed to read {arg}"))?
    };
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{side} side is not valid JSON"))?;
    AnswerSet::from_json(value, side).map_err(Into::into)
}

pub fn execute(standard: String, response: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let standard = load_answer_set(&standard, Side::Standard)?;
    let response = load_answer_set(&response, Side::Response)?;

    let score = grade(&standard, &response, &config)?;
    let classification = classify(&standard, &response, &config)?;

    println!("Accuracy: {:.2}%", score.accuracy);
    println!(
        "Edit distance: {} (reference {}, answered {})",
        score.edit_distance, score.total, score.answered_count
    );
    println!(
        "Correct: {}  Wrong: {}  Missing: {}  Extra: {}",
        score.correct_count, score.wrong_count, score.missing_count, score.extra_count
    );

    let mut table = Table::new();
    table.set_header(vec!["Reference key", "Value", "Label"]);
    for (key, label) in &classification.labels {
        let value = standard
            .get(&key.to_string())
            .map(|v| v.to_string())
            .unwrap_or_default();
        let label = match label {
            PositionLabel::Correct => "correct",
            PositionLabel::Misorder => "misorder",
            PositionLabel::Missing => "missing",
        };
        table.add_row(vec![Cell::new(key), Cell::new(value), Cell::new(label)]);
    }
    println!("\n{table}");

    if classification.hallucinations.is_empty() {
        println!("\nNo hallucinated entries.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Response key", "Value", "Interval"]);
        for event in &classification.hallucinations {
            let value = response
                .get(&event.response_key.to_string())
                .map(|v| v.to_string())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(event.response_key),
                Cell::new(value),
                Cell::new(format!("({}, {})", event.interval.from, event.interval.to)),
            ]);
        }
        println!("\nHallucinated entries:\n{table}");
    }

    Ok(())
}
