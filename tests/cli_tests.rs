use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn records(data: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("academic-records");
    cmd.arg("--data").arg(data).args(args).assert()
}

fn seed(data: &Path) {
    records(data, &["add-professor", "P1", "Dr. Ruiz", "--specialty", "Math"]).success();
    records(data, &["add-student", "S1", "Ana", "Engineering"]).success();
    records(data, &["add-student", "S2", "Luis", "Law"]).success();
    records(data, &["add-subject", "M1", "Calculus", "3", "--professor", "P1"]).success();
    records(data, &["add-grade", "S1", "M1", "4.0", "50", "--date", "2024-03-01"]).success();
    records(data, &["add-grade", "S1", "M1", "5.0", "50", "--date", "2024-03-02"]).success();
    records(data, &["add-grade", "S2", "M1", "2.9", "100", "--date", "2024-03-03"]).success();
}

#[test]
fn test_binary_help() {
    let mut cmd = cargo_bin_cmd!("academic-records");
    cmd.arg("--help").assert().success();
}

#[test]
fn test_stats_on_missing_data_file() {
    let dir = tempdir().unwrap();
    records(&dir.path().join("none.csv"), &["stats"])
        .success()
        .stdout(predicate::str::contains("Mean: n/a"));
}

#[test]
fn test_mutations_persist_between_runs() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    assert!(data.exists());
    records(&data, &["ranking"])
        .success()
        .stdout(predicate::str::contains("S1").and(predicate::str::contains("4.50")));
    records(&data, &["risk", "--threshold", "3.0"])
        .success()
        .stdout(predicate::str::contains("S2").and(predicate::str::contains("S1").not()));
}

#[test]
fn test_stats_json() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    let output = records(&data, &["stats", "--json"]).success().get_output().stdout.clone();
    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["total_grades"], 3);
    assert_eq!(summary["best_student"]["code"], "S1");
}

#[test]
fn test_rejected_mutation_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);
    let before = fs::read(&data).unwrap();

    records(&data, &["add-student", "S1", "Clone", "Law"])
        .failure()
        .stderr(predicate::str::contains("already exists"));
    records(&data, &["delete-professor", "P1"])
        .failure()
        .stderr(predicate::str::contains("still assigned"));

    assert_eq!(fs::read(&data).unwrap(), before);
}

#[test]
fn test_delete_subject_cascades() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    records(&data, &["delete-subject", "M1"])
        .success()
        .stdout(predicate::str::contains("3 grade entries removed"));
}

#[test]
fn test_export_import_and_report() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    let exported = dir.path().join("exported.csv");
    let copy = dir.path().join("copy.csv");
    let report = dir.path().join("report.txt");
    seed(&data);

    records(&data, &["export", exported.to_str().unwrap()]).success();
    records(&copy, &["import", exported.to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("2 students"));
    assert_eq!(fs::read(&data).unwrap(), fs::read(&copy).unwrap());

    records(&copy, &["report", "--out", report.to_str().unwrap()]).success();
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("STUDENTS AT RISK"));
}

#[test]
fn test_import_bad_file_reports_line() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "student,S1,Ana,Law,,\ngrade,S1,NOPE,4.0,50,2024-01-01,\n").unwrap();

    records(&data, &["import", bad.to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("line 2"));
    assert!(!data.exists());
}

#[test]
fn test_student_lookup_filters() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    records(&data, &["students", "--search", "ana"])
        .success()
        .stdout(predicate::str::contains("S1").and(predicate::str::contains("S2").not()));
    records(&data, &["students", "--program", "Law"])
        .success()
        .stdout(predicate::str::contains("Luis").and(predicate::str::contains("Ana").not()));
    records(&data, &["students", "--program", "Medicine"])
        .success()
        .stdout(predicate::str::contains("No matching students"));
}

#[test]
fn test_student_detail_shows_ledger_positions() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    records(&data, &["student", "S2"])
        .success()
        .stdout(
            predicate::str::contains("Average:          2.90")
                .and(predicate::str::contains("#2"))
                .and(predicate::str::contains("2024-03-03")),
        );
    records(&data, &["student", "S9"])
        .failure()
        .stderr(predicate::str::contains("student 'S9' not found"));
}

#[test]
fn test_subject_detail() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    records(&data, &["subject", "M1"])
        .success()
        .stdout(
            predicate::str::contains("Professor: P1 Dr. Ruiz")
                .and(predicate::str::contains("Average:   3.97"))
                .and(predicate::str::contains("1 excellent, 1 good, 0 fair, 1 failing")),
        );
    records(&data, &["subject", "X1"])
        .failure()
        .stderr(predicate::str::contains("subject 'X1' not found"));
}

#[test]
fn test_programs_trends_and_histogram() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("records.csv");
    seed(&data);

    records(&data, &["programs"])
        .success()
        .stdout(
            predicate::str::contains("Engineering")
                .and(predicate::str::contains("4.50 (1 students)"))
                .and(predicate::str::contains("2.90 (1 students)")),
        );
    records(&data, &["trends"])
        .success()
        .stdout(predicate::str::contains("2024-03  3.97 (3 entries)"));

    let output = records(&data, &["histogram", "--bins", "5"])
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().last().unwrap().contains("   2"));

    records(&data, &["histogram", "--bins", "0"]).failure();
}
