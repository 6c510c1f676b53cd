//! End-to-end tests for the `poolkit` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn poolkit() -> Command {
    let mut cmd = Command::cargo_bin("poolkit").unwrap();
    // keep the developer's environment out of the layered config
    for key in [
        "POOLKIT_CAPACITY",
        "POOLKIT_ZERO_SIZE",
        "POOLKIT_METADATA_LIMIT",
        "POOLKIT_LOG_LEVEL",
        "POOLKIT_LOG_FORMAT",
        "POOLKIT_LOG",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn run_prints_one_line_per_step() {
    poolkit()
        .args(["run", "insert:1", "insert:2", "insert:3", "delete:2", "values", "count"])
        .assert()
        .success()
        .stdout(
            "inserted 1 at +0x0000\n\
             inserted 2 at +0x0010\n\
             inserted 3 at +0x0020\n\
             deleted 2\n\
             [1, 3]\n\
             count: 2\n",
        );
}

#[test]
fn failing_step_reports_and_continues() {
    poolkit()
        .args(["run", "--capacity", "16", "alloc:17", "insert:5", "values"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: POOL:ALLOC:EXHAUSTED"))
        .stdout(predicate::str::contains("inserted 5 at +0x0000"))
        .stdout(predicate::str::ends_with("[5]\n"));
}

#[test]
fn peek_policy_from_flag() {
    poolkit()
        .args(["run", "--zero-size", "peek", "alloc:0", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allocated 0 bytes at +0x0000"))
        .stdout(predicate::str::contains("blocks: 1"));
}

#[test]
fn status_command_prints_report() {
    poolkit()
        .args(["status", "--capacity", "128"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memory Pool Size: 128 bytes"))
        .stdout(predicate::str::contains("Block at +0x0000 - Size: 128 bytes - Free"));
}

#[test]
fn env_layer_is_overridden_by_flags() {
    poolkit()
        .env("POOLKIT_CAPACITY", "512")
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity = 512"));

    poolkit()
        .env("POOLKIT_CAPACITY", "512")
        .args(["config", "--capacity", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity = 64"));
}

#[test]
fn log_filter_env_vars_sit_below_explicit_settings() {
    poolkit()
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"warn\""));

    poolkit()
        .env("RUST_LOG", "debug")
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"debug\""));

    poolkit()
        .env("RUST_LOG", "debug")
        .env("POOLKIT_LOG", "poolkit_list=trace")
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"poolkit_list=trace\""));

    poolkit()
        .env("POOLKIT_LOG", "trace")
        .env("POOLKIT_LOG_LEVEL", "error")
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"error\""));

    poolkit()
        .env("POOLKIT_LOG", "trace")
        .args(["config", "--log-level", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"info\""));
}

#[test]
fn config_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "capacity = 32\n").unwrap();

    poolkit()
        .args(["run", "insert:1", "insert:2", "insert:3"])
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: POOL:ALLOC:EXHAUSTED"));
}

#[test]
fn unknown_step_is_a_usage_error() {
    poolkit()
        .args(["run", "launch:1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown step"));
}
