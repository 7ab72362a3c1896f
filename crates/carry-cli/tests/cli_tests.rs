//! End-to-end tests for the `carry` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn carry() -> Command {
    let mut cmd = Command::cargo_bin("carry").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("CARRY_CONFIG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// BREAKEVEN
// =============================================================================

#[test]
fn test_breakeven_manual_rate() {
    let dir = TempDir::new().unwrap();
    let notes = write(
        &dir,
        "notes.json",
        r#"[{"symbol": "S30J5", "c": 135.0}, {"symbol": "S31L5", "c": null}]"#,
    );

    carry()
        .args(["breakeven", "--mep", "1250", "--manual", "--as-of", "2025-06-01", "--quotes"])
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("S30J5"))
        .stdout(predicate::str::contains("1357.47"))
        .stdout(predicate::str::contains("29"))
        .stdout(predicate::str::contains("S31L5").not());
}

#[test]
fn test_breakeven_json_uses_mep_feed() {
    let dir = TempDir::new().unwrap();
    let notes = write(&dir, "notes.json", r#"[{"symbol": "S30J5", "c": 135.0}]"#);
    let mep = write(
        &dir,
        "mep.json",
        r#"[
            {"ticker": "AL30", "close": 1190.0},
            {"ticker": "GD30", "close": 1210.0},
            {"ticker": "AL29", "close": 1200.0}
        ]"#,
    );

    let output = carry()
        .args(["--format", "json", "breakeven", "--quotes"])
        .arg(&notes)
        .arg("--mep-file")
        .arg(&mep)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["spot"]["source"], "market");
    assert_eq!(value["spot"]["rate"], 1200.0);
    let be = value["results"][0]["breakeven"].as_f64().unwrap();
    assert!((be - 1200.0 * 146.607 / 135.0).abs() < 1e-9);
    assert_eq!(value["corridor"][0]["position"], "inside");
}

#[test]
fn test_breakeven_falls_back_when_mep_feed_missing() {
    let dir = TempDir::new().unwrap();
    let notes = write(&dir, "notes.json", r#"[{"symbol": "S30J5", "c": 146.607}]"#);

    carry()
        .args(["breakeven", "--mep", "1180", "--mep-file"])
        .arg(dir.path().join("missing.json"))
        .arg("--quotes")
        .arg(&notes)
        .assert()
        .success()
        .stderr(predicate::str::contains("using manual rate"))
        .stdout(predicate::str::contains("1180.00"));
}

#[test]
fn test_breakeven_empty_result() {
    let dir = TempDir::new().unwrap();
    let notes = write(&dir, "notes.json", r#"[{"symbol": "S30J5", "c": 0}]"#);

    carry()
        .args(["breakeven", "--mep", "1250", "--show-excluded", "--quotes"])
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("No results."))
        .stdout(predicate::str::contains("non-positive price"));
}

#[test]
fn test_breakeven_csv_quotes_and_reference() {
    let dir = TempDir::new().unwrap();
    let quotes = write(&dir, "quotes.csv", "symbol,price\nX1,100\nX2,\n");
    let reference = write(
        &dir,
        "reference.csv",
        "symbol,maturity,payoff\nX1,2025-12-31,110\nX2,2026-06-30,120\n",
    );

    carry()
        .args(["--format", "csv", "breakeven", "--mep", "1000", "--quotes"])
        .arg(&quotes)
        .arg("--reference-csv")
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::contains("X1"))
        .stdout(predicate::str::contains("1100.00"))
        .stdout(predicate::str::contains("X2").not());
}

#[test]
fn test_breakeven_early_maturity_keeps_other_corridor_rows() {
    let dir = TempDir::new().unwrap();
    let quotes = write(&dir, "quotes.csv", "symbol,price\nOLD,100\nNEW,100\n");
    let reference = write(
        &dir,
        "reference.csv",
        "symbol,maturity,payoff\nOLD,2025-03-31,100\nNEW,2025-06-30,100\n",
    );

    let output = carry()
        .args(["--format", "json", "breakeven", "--mep", "1200", "--quotes"])
        .arg(&quotes)
        .arg("--reference-csv")
        .arg(&reference)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["results"][0]["id"], "OLD");
    assert!(value["corridor"][0].is_null());
    assert_eq!(value["corridor"][1]["id"], "NEW");
    assert_eq!(value["corridor"][1]["position"], "inside");

    carry()
        .args(["breakeven", "--mep", "1200", "--as-of", "2025-03-01", "--quotes"])
        .arg(&quotes)
        .arg("--reference-csv")
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::contains("inside"));
}

#[test]
fn test_breakeven_missing_quotes_file_fails() {
    carry()
        .args(["breakeven", "--mep", "1250", "--quotes", "/nonexistent/notes.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load quotes"));
}

#[test]
fn test_breakeven_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    let notes = write(&dir, "notes.json", "[]");

    carry()
        .args(["breakeven", "--as-of", "01/06/2025", "--quotes"])
        .arg(&notes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

// =============================================================================
// MATRIX
// =============================================================================

#[test]
fn test_matrix_defaults() {
    carry()
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::contains("-32.30"))
        .stdout(predicate::str::contains("47.37"))
        .stdout(predicate::str::contains("1477.00"));
}

#[test]
fn test_matrix_simple_and_compounded_differ() {
    let base = [
        "--format",
        "json",
        "matrix",
        "--entry-low",
        "1000",
        "--entry-high",
        "1400",
        "--exit-low",
        "944.67",
        "--exit-high",
        "1477.47",
        "--bond-entry",
        "135.45",
        "--bond-exit",
        "158.98",
    ];

    let simple = carry().args(base).output().unwrap();
    let compounded = carry().args(base).arg("--compounded").output().unwrap();
    assert!(simple.status.success() && compounded.status.success());

    let simple: serde_json::Value = serde_json::from_slice(&simple.stdout).unwrap();
    let compounded: serde_json::Value = serde_json::from_slice(&compounded.stdout).unwrap();
    assert_eq!(simple["formula"]["formula"], "simple");
    assert_eq!(compounded["formula"]["formula"], "compounded");

    let corner = |v: &serde_json::Value| v["cells"][5][0].as_f64().unwrap();
    assert!(corner(&compounded) > corner(&simple));
}

#[test]
fn test_matrix_zero_exit_is_na() {
    carry()
        .args(["matrix", "--exit-low", "0", "--exit-high", "100", "--samples", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n/a"))
        .stdout(predicate::str::contains("undefined"));
}

#[test]
fn test_matrix_rejects_inverted_band() {
    carry()
        .args(["matrix", "--entry-low", "1400", "--entry-high", "1000"])
        .assert()
        .failure();
}

#[test]
fn test_matrix_rejects_non_positive_bond_exit() {
    for exit in ["0", "-158.98"] {
        carry()
            .args(["matrix", "--bond-entry", "135.45", "--compounded"])
            .arg(format!("--bond-exit={exit}"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("bond exit price must be positive"));
    }
}

#[test]
fn test_matrix_bond_flags_conflict() {
    carry()
        .args(["matrix", "--bond-return", "5", "--bond-entry", "100", "--bond-exit", "110"])
        .assert()
        .failure();
}

// =============================================================================
// BAND / REFERENCE / CONFIG
// =============================================================================

#[test]
fn test_band_at_reference_and_after_a_month() {
    carry()
        .args(["band", "--dates", "2025-04-14", "2025-05-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1400.00"))
        .stdout(predicate::str::contains("1000.00"))
        .stdout(predicate::str::contains("1413.80"));
}

#[test]
fn test_band_before_reference_date_fails() {
    carry()
        .args(["band", "--dates", "2025-01-01"])
        .assert()
        .failure();
}

#[test]
fn test_reference_lists_builtin_table() {
    carry()
        .args(["--format", "csv", "reference"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ticker,maturity,payoff"))
        .stdout(predicate::str::contains("S16A5,2025-04-16,131.21"))
        .stdout(predicate::str::contains("TTD26"));
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "carry.toml",
        r#"
        [corridor]
        upper_start = 1500.0

        [[instruments]]
        id = "ONLY"
        maturity = "2026-01-01"
        payoff = 100.0
        "#,
    );

    carry()
        .arg("--config")
        .arg(&config)
        .args(["band", "--dates", "2025-04-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1500.00"));

    carry()
        .arg("--config")
        .arg(&config)
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 reference instruments"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "carry.toml", "[spot]\nmanual_rate = -5.0\n");

    carry()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_default_config_round_trips() {
    carry()
        .args(["config", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[corridor]"))
        .stdout(predicate::str::contains("manual_rate = 1250.0"));
}
