use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const BANK: &str = "\
Date,Description,Amount
2025-01-15,Amazon AWS,120.00
2025-01-16,Office Depot supplies,45.50
2025-01-20,Unknown wire,999.00
";

const LEDGER: &str = "\
date,description,amount
2025-01-15,amazon aws,120.00
2025-01-17,office depot,45.50
2025-01-25,IRS estimated tax,1500.00
";

fn matchbook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("matchbook").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1");
    cmd
}

fn write_feeds(dir: &Path) -> (String, String) {
    let bank = dir.join("bank.csv");
    let ledger = dir.join("ledger.csv");
    std::fs::write(&bank, BANK).unwrap();
    std::fs::write(&ledger, LEDGER).unwrap();
    (
        bank.to_string_lossy().into_owned(),
        ledger.to_string_lossy().into_owned(),
    )
}

#[test]
fn reconcile_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Needs Review"))
        .stdout(predicate::str::contains("2 unmatched transactions"))
        .stdout(predicate::str::contains("Largest payment: $1500.00"));
}

#[test]
fn reconcile_writes_csv_report() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    let out = dir.path().join("out").join("report.csv");
    matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str(), "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let report = std::fs::read_to_string(&out).unwrap();
    assert!(report.starts_with("Reconciliation Report\n\nSummary\nTotal Transactions,4\n"));
    assert!(report.contains("Matched Transactions,2\n"));
    assert!(report.contains("Unmatched Transactions,2\n"));
    assert!(report.contains(
        "\"2025-01-15\",\"Amazon AWS\",120.00,\"2025-01-15\",\"amazon aws\",120.00,Matched,98%,\"None\"\n"
    ));
    assert!(report.contains(
        "\"\",\"\",,\"2025-01-25\",\"IRS estimated tax\",1500.00,Unmatched,0%,\"Unmatched\"\n"
    ));
    assert!(report.contains("Categories\nCategory,Amount\n"));
    assert!(report.contains("\"Taxes\",1500.00\n"));
}

#[test]
fn reconcile_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    let output = matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["analysis"]["total_transactions"], 4);
    assert_eq!(value["results"].as_array().unwrap().len(), 4);
}

#[test]
fn reconcile_with_seed_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    let run = || {
        matchbook(dir.path())
            .args(["reconcile", bank.as_str(), ledger.as_str(), "--json", "--seed", "11"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn reconcile_accepts_legacy_algorithm_name() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str(), "--algorithm", "levenshtein"])
        .assert()
        .success();
}

#[test]
fn reconcile_empty_bank_lists_ledger_as_unmatched() {
    let dir = tempfile::tempdir().unwrap();
    let (_, ledger) = write_feeds(dir.path());
    let bank = dir.path().join("empty.csv");
    std::fs::write(&bank, "Date,Description,Amount\n").unwrap();
    let output = matchbook(dir.path())
        .args(["reconcile"])
        .arg(&bank)
        .args([ledger.as_str(), "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["analysis"]["total_transactions"], 3);
    assert_eq!(value["analysis"]["unmatched_transactions"], 3);
}

#[test]
fn reconcile_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, ledger) = write_feeds(dir.path());
    matchbook(dir.path())
        .args(["reconcile", "does-not-exist.csv", ledger.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Cannot read does-not-exist.csv"));
}

#[test]
fn reconcile_rejects_bad_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str(), "--delimiter", "::"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}

#[test]
fn settings_supply_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, ledger) = write_feeds(dir.path());
    let config = dir.path().join(".config").join("matchbook");
    std::fs::create_dir_all(&config).unwrap();
    // Zero amount tolerance still pairs the equal-amount office rows.
    std::fs::write(
        config.join("settings.json"),
        r#"{"amount_tolerance_percent": 0, "detail_limit": 1}"#,
    )
    .unwrap();
    matchbook(dir.path())
        .args(["reconcile", bank.as_str(), ledger.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 4 transactions"));
}

#[test]
fn preview_shows_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (bank, _) = write_feeds(dir.path());
    matchbook(dir.path())
        .args(["preview", bank.as_str(), "--rows", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amazon AWS"))
        .stdout(predicate::str::contains("Office Depot").not())
        .stdout(predicate::str::contains("1 of 3 rows"));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    matchbook(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(dir.path().join(".config/matchbook/settings.json").exists());
    matchbook(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date_tolerance_days\": 3"))
        .stdout(predicate::str::contains("\"algorithm\": \"word-overlap\""));
}
