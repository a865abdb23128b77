//! End-to-end tests driving the `stamper` binary.
//!
//! Each test runs against its own temporary home so no user configuration
//! or data leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn stamper_binary() -> String {
    env!("CARGO_BIN_EXE_stamper").to_string()
}

/// Builds a command isolated to `home`, storing events in `SQLite` under it.
fn stamper(home: &Path) -> Command {
    let mut cmd = Command::new(stamper_binary());
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("RUST_LOG")
        .env("STAMPER_DATABASE_PATH", home.join("data/stamper.db"))
        .env("STAMPER_TIMEZONE", "UTC");
    cmd
}

fn run_ok(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run stamper");
    assert!(
        output.status.success(),
        "stamper should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

const SCENARIO: [&str; 6] = ["07:00", "08:30", "09:00", "12:00", "13:00", "17:00"];

#[test]
fn test_stamp_toggles_state() {
    let temp = TempDir::new().unwrap();

    let status = json_stdout(&run_ok(stamper(temp.path()).args(["status", "--json"])));
    assert_eq!(status["current_state"], "CLOCKED_OUT");

    let first = json_stdout(&run_ok(stamper(temp.path()).args(["stamp", "--json"])));
    assert_eq!(first["current_state"], "CLOCKED_IN");
    assert_eq!(first["events"].as_array().unwrap().len(), 1);

    let second = json_stdout(&run_ok(stamper(temp.path()).args(["stamp", "--json"])));
    assert_eq!(second["current_state"], "CLOCKED_OUT");

    assert!(temp.path().join("data/stamper.db").exists());
    assert!(temp.path().join("data/.lock").exists());
}

#[test]
fn test_set_day_for_past_date() {
    let temp = TempDir::new().unwrap();

    let output = run_ok(
        stamper(temp.path())
            .args(["set-day", "--date", "2022-01-05"])
            .args(SCENARIO),
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Worked: 08h30m. Left: -00h30m"), "{stdout}");
    assert!(stdout.contains("Overtime this month: 00h30m"), "{stdout}");

    let day = json_stdout(&run_ok(
        stamper(temp.path()).args(["day", "--date", "2022-01-05", "--json"]),
    ));
    assert_eq!(day["worked_today"], "08h30m. Left: -00h30m");
    assert_eq!(day["events"].as_array().unwrap().len(), 6);

    let overtime = run_ok(
        stamper(temp.path()).args(["overtime", "--year", "2022", "--month", "1"]),
    );
    assert_eq!(
        String::from_utf8(overtime.stdout).unwrap().trim(),
        "Overtime 2022-01: 00h30m"
    );
}

#[test]
fn test_set_day_rejects_bad_entry() {
    let temp = TempDir::new().unwrap();

    let output = stamper(temp.path())
        .args(["set-day", "--date", "2022-01-05", "7 o'clock"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid entry"));
}

#[test]
fn test_json_backend_writes_month_file() {
    let temp = TempDir::new().unwrap();
    let months = temp.path().join("months");

    run_ok(
        stamper(temp.path())
            .env("STAMPER_STORAGE", "json")
            .env("STAMPER_JSON_DIR", &months)
            .args(["set-day", "--date", "2022-01-05", "09:00", "12:00/30", "17:00"]),
    );

    let content = std::fs::read_to_string(months.join("2022-01-clock-times.json")).unwrap();
    let events: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(events[0]["date"], "2022-01-05T09:00:00");
    assert_eq!(events[1]["pause"], 30);
    assert!(!temp.path().join("data/stamper.db").exists());

    let day = json_stdout(&run_ok(
        stamper(temp.path())
            .env("STAMPER_STORAGE", "json")
            .env("STAMPER_JSON_DIR", &months)
            .args(["day", "--date", "2022-01-05", "--json"]),
    ));
    assert_eq!(day["worked_today"], "07h30m. Left: 00h30m");
}

#[test]
fn test_config_file_sets_expected_minutes() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("stamper.toml");
    std::fs::write(&config, "expected_minutes_per_day = 420\n").unwrap();

    let output = run_ok(
        stamper(temp.path())
            .arg("--config")
            .arg(&config)
            .args(["set-day", "--date", "2022-01-05", "--json"])
            .args(SCENARIO),
    );

    let summary = json_stdout(&output);
    assert_eq!(summary["worked_today"], "08h30m. Left: -01h30m");
    assert_eq!(summary["overtime_month"], "01h30m");
}

#[test]
fn test_unknown_timezone_fails() {
    let temp = TempDir::new().unwrap();

    let output = stamper(temp.path())
        .env("STAMPER_TIMEZONE", "Nowhere/Special")
        .arg("status")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid configuration"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    let output = run_ok(&mut stamper(temp.path()));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("set-day"));
}
