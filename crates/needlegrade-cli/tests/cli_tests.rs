//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn needlegrade() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("needlegrade").unwrap()
}

fn write_records(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("records.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"standard": {"0": "A", "1": "B", "2": "C"}, "response": {"0": "A", "1": "B", "2": "C"}}"#,
            "\n",
            r#"{"standard": {"0": "A", "1": "B", "2": "C"}, "response": {"0": "A", "1": "X", "2": "B", "3": "C"}}"#,
            "\n",
            "this line is not json\n",
            r#"{"standard": {"0": "A", "1": "B"}, "response": {"0": "B", "1": "A"}}"#,
            "\n",
        ),
    )
    .unwrap();
    path
}

#[test]
fn run_grades_a_batch_and_saves_a_report() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);
    let output = dir.path().join("results");

    needlegrade()
        .arg("run")
        .arg("--records")
        .arg(&records)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Graded 3/4 records, 1 skipped"))
        .stderr(predicate::str::contains("Report saved to:"));

    let reports: Vec<_> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);
    let content = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(content.contains("\"graded_records\": 3"));
}

#[test]
fn run_missing_record_file_fails() {
    needlegrade()
        .arg("run")
        .arg("--records")
        .arg("/nonexistent/records.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read record file"));
}

#[test]
fn run_rejects_zero_parallelism() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    needlegrade()
        .arg("run")
        .arg("--records")
        .arg(&records)
        .arg("--parallelism")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parallelism must be at least 1"));
}

#[test]
fn inspect_prints_labels_and_hallucinations() {
    needlegrade()
        .arg("inspect")
        .arg("--standard")
        .arg(r#"{"0": "A", "1": "B", "2": "C"}"#)
        .arg("--response")
        .arg(r#"{"0": "A", "1": "X", "2": "B", "3": "C"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy:"))
        .stdout(predicate::str::contains("correct"))
        .stdout(predicate::str::contains("Hallucinated entries"))
        .stdout(predicate::str::contains("(0, 1)"));
}

#[test]
fn inspect_swapped_pair_reports_misorder() {
    needlegrade()
        .arg("inspect")
        .arg("--standard")
        .arg(r#"{"0": "A", "1": "B"}"#)
        .arg("--response")
        .arg(r#"{"0": "B", "1": "A"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("misorder"))
        .stdout(predicate::str::contains("No hallucinated entries"));
}

#[test]
fn inspect_reads_answer_sets_from_files() {
    let dir = TempDir::new().unwrap();
    let standard = dir.path().join("standard.json");
    let response = dir.path().join("response.json");
    std::fs::write(&standard, r#"{"0": "A"}"#).unwrap();
    std::fs::write(&response, r#"{"0": "A"}"#).unwrap();

    needlegrade()
        .arg("inspect")
        .arg("--standard")
        .arg(&standard)
        .arg("--response")
        .arg(&response)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy: 100.00%"));
}

#[test]
fn inspect_invalid_json_fails() {
    needlegrade()
        .arg("inspect")
        .arg("--standard")
        .arg(r#"{"0": "#)
        .arg("--response")
        .arg(r#"{"0": "A"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("standard"));
}

#[test]
fn show_renders_a_saved_report() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);
    let output = dir.path().join("results");

    needlegrade()
        .arg("run")
        .arg("--records")
        .arg(&records)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = std::fs::read_dir(&output)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    needlegrade()
        .arg("show")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct:"))
        .stdout(predicate::str::contains("Misorder:"))
        .stdout(predicate::str::contains("Missing:"))
        .stdout(predicate::str::contains("Hallucination:"));
}

#[test]
fn show_filters_by_kind() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);
    let output = dir.path().join("results");

    needlegrade()
        .arg("run")
        .arg("--records")
        .arg(&records)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = std::fs::read_dir(&output)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    needlegrade()
        .arg("show")
        .arg("--report")
        .arg(&report)
        .arg("--kind")
        .arg("missing")
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing:"))
        .stdout(predicate::str::contains("Correct:").not());
}

#[test]
fn show_rejects_unknown_kind() {
    needlegrade()
        .arg("show")
        .arg("--report")
        .arg("whatever.json")
        .arg("--kind")
        .arg("bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid kind"));
}

#[test]
fn run_honors_config_file() {
    let dir = TempDir::new().unwrap();
    let records = dir.path().join("records.jsonl");
    // hallucination after the last anchor picks up the configured sentinel
    std::fs::write(
        &records,
        concat!(
            r#"{"standard": {"0": "A"}, "response": {"0": "A", "1": "X"}}"#,
            "\n"
        ),
    )
    .unwrap();
    let config = dir.path().join("grading.toml");
    std::fs::write(&config, "sequence_length = 10\n").unwrap();
    let output = dir.path().join("results");

    needlegrade()
        .arg("run")
        .arg("--records")
        .arg(&records)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("(0, 11)"));
}
