//! Integration tests for the parking-ledger binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn parking_ledger() -> Command {
    let mut cmd = Command::cargo_bin("parking-ledger").unwrap();
    cmd.arg("--no-color");
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("parking-ledger.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    parking_ledger()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_quote_car() {
    parking_ledger()
        .args(["quote", "--kind", "car", "--hours", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp 15,000.00"));
}

#[test]
fn test_quote_vip_json() {
    let output = parking_ledger()
        .args(["--json", "quote", "--kind", "motorcycle", "--hours", "3", "--vip"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["fee"], 22_500.0);
    assert_eq!(value["slot_type"], "vip");
}

#[test]
fn test_quote_invalid_kind_fails() {
    parking_ledger()
        .args(["quote", "--kind", "truck", "--hours", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vehicle kind"));
}

#[test]
fn test_layout_lists_default_slots() {
    parking_ledger()
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("R1"))
        .stdout(predicate::str::contains("V3"))
        .stdout(predicate::str::contains("10 active slots"));
}

#[test]
fn test_config_file_overrides_rates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[rates]\ncar_per_hour = 6000.0\n");

    parking_ledger()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("car_per_hour: 6000.0"));

    parking_ledger()
        .arg("--config")
        .arg(&path)
        .args(["quote", "--kind", "car", "--hours", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp 12,000.00"));
}

#[test]
fn test_environment_overrides_rates() {
    parking_ledger()
        .env("PARKING__RATES__CAR_PER_HOUR", "7000")
        .args(["quote", "--kind", "car", "--hours", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp 7,000.00"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    parking_ledger()
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("layout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_duplicate_slot_layout_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[[layout.slots]]
id = "A1"
kind = "regular"
level = 1

[[layout.slots]]
id = "A1"
kind = "vip"
level = 1
"#,
    );

    parking_ledger()
        .arg("--config")
        .arg(&path)
        .args(["batch"])
        .write_stdin("status\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate slot id"));
}

#[test]
fn test_batch_session_park_and_pay() {
    parking_ledger()
        .arg("batch")
        .write_stdin("park car B1234 Budi\nunpark 1000\nreport\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket 1000 issued"))
        .stdout(predicate::str::contains("slot R1"))
        .stdout(predicate::str::contains("Ticket 1000 paid: Rp 5,000.00"))
        .stdout(predicate::str::contains("Total revenue: Rp 5,000.00"));
}

#[test]
fn test_batch_reports_errors_and_continues() {
    parking_ledger()
        .arg("batch")
        .write_stdin("unpark 9999\npark car B1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("line 1"))
        .stderr(predicate::str::contains("invalid or has already been paid"))
        .stdout(predicate::str::contains("Ticket 1000 issued"));
}

#[test]
fn test_batch_export_csv() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("tickets.csv");

    parking_ledger()
        .arg("batch")
        .write_stdin(format!(
            "park motorcycle M1\npark ev E1 --charging\nexport {}\n",
            export.display()
        ))
        .assert()
        .success();

    let csv = std::fs::read_to_string(&export).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains(",M1,"));
    assert!(csv.contains(",E1,"));
}
