//! CLI Integration Tests
//!
//! Runs the templatinator binary with assert_cmd against sample projects in a
//! temp directory.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn templatinator() -> Command {
    let mut cmd = Command::cargo_bin("templatinator").unwrap();
    cmd.env_remove("TEMPLATINATOR_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn init_sample(dir: &Path) {
    templatinator().arg("init").arg(dir).assert().success();
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    templatinator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("templatinator"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    templatinator()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("templatinator"));
}

#[test]
fn test_generate_help() {
    templatinator()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--strict-columns"));
}

// ═══════════════════════════════════════════════════════════════════════════
// INIT + GENERATE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_init_creates_sample_project() {
    let dir = TempDir::new().unwrap();
    templatinator()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("template-data.json"));

    assert!(dir.path().join("template.xlsx").exists());
    assert!(dir.path().join("data.xlsx").exists());
    assert!(dir.path().join("template-data.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .arg("init")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_generate_sample_project() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .args(["generate", "--config"])
        .arg(dir.path().join("template-data.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 workbooks"));

    let output = dir.path().join("output");
    assert!(output.join("Ada Lovelace - 1A.xlsx").exists());
    assert!(output.join("Grace Hopper - 2B.xlsx").exists());
    assert!(output.join("Alan Turing - 3C.xlsx").exists());
}

#[test]
fn test_no_subcommand_uses_default_config_in_cwd() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 workbooks"));

    assert!(dir.path().join("output").join("Alan Turing - 3C.xlsx").exists());
}

#[test]
fn test_config_from_env_var() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .arg("generate")
        .env("TEMPLATINATOR_CONFIG", dir.path().join("template-data.json"))
        .assert()
        .success();

    assert!(dir.path().join("output").join("Ada Lovelace - 1A.xlsx").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .args(["generate", "--dry-run", "--config"])
        .arg(dir.path().join("template-data.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("would write"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_verbose_reports_counts() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .args(["generate", "-v", "-c"])
        .arg(dir.path().join("template-data.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 data rows, 3 columns"));
}

#[test]
fn test_inspect_lists_variables() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());

    templatinator()
        .args(["inspect", "-c"])
        .arg(dir.path().join("template-data.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit__"))
        .stdout(predicate::str::contains("Monthly_Rent"))
        .stdout(predicate::str::contains("{{Name}}"));

    assert!(!dir.path().join("output").exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// SHORT-CIRCUITS AND ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_areas_is_clean_exit() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("template-data.json");
    fs::write(
        &config,
        r#"{ "Input": "t.xlsx", "OutputTemplate": "x.xlsx", "Areas": [] }"#,
    )
    .unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No template areas defined. Define areas and re-run the program.",
        ));
}

#[test]
fn test_missing_output_template_is_clean_exit() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("template-data.json");
    fs::write(
        &config,
        r#"{ "Input": "t.xlsx", "Areas": [ { "Range": "A1" } ] }"#,
    )
    .unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No input or output file defined. Check the config and re-run the program.",
        ));
}

#[test]
fn test_header_only_data_is_clean_exit() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());
    let config = dir.path().join("template-data.json");
    let text = fs::read_to_string(&config).unwrap().replace("A1:C4", "A1:C1");
    fs::write(&config, text).unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No header or not enough data to populate template.",
        ));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_template_fails() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());
    fs::remove_file(dir.path().join("template.xlsx")).unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(dir.path().join("template-data.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Workbook error"));
}

#[test]
fn test_invalid_range_fails() {
    let dir = TempDir::new().unwrap();
    init_sample(dir.path());
    let config = dir.path().join("template-data.json");
    let text = fs::read_to_string(&config).unwrap().replace("A1:B4", "A1:B4:C9");
    fs::write(&config, text).unwrap();

    templatinator()
        .args(["generate", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cell range"));
}
