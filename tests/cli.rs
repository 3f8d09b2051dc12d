#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use shiftboard::storage::{JsonStorage, Storage};
use std::path::Path;
use tempfile::tempdir;

fn cli(board: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shiftboard-cli").unwrap();
    cmd.env_remove("SHIFTBOARD_USER")
        .arg("--board")
        .arg(board);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap().trim().to_string()
}

#[test]
fn full_flow_from_users_to_clock_out() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("board.json");

    cli(&board)
        .args(["add-user", "--username", "bob", "--role", "admin"])
        .assert()
        .success();
    for name in ["jane", "alice"] {
        cli(&board)
            .args(["add-user", "--username", name])
            .assert()
            .success();
    }

    let schedule = stdout_of(cli(&board).args(["--as", "bob", "create-schedule", "--name", "Octobre"]));
    for (start, end) in [
        ("2025-10-01T08:00:00Z", "2025-10-01T16:00:00Z"),
        ("2025-10-02 08:00:00", "2025-10-02 16:00:00"),
    ] {
        cli(&board)
            .args(["--as", "bob", "add-template", "--schedule", &schedule])
            .args(["--start", start, "--end", end])
            .assert()
            .success();
    }

    cli(&board)
        .args(["--as", "bob", "auto-schedule", "--schedule", &schedule, "--method", "EVEN "])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"staff_name\": \"jane\""))
        .stdout(predicate::str::contains("\"staff_name\": \"alice\""));

    let stored = JsonStorage::open(&board).unwrap().load().unwrap();
    assert!(stored.shifts.iter().all(|s| s.staff_id.is_some()));
    let jane = stored.find_account_by_username("jane").unwrap().id.clone();
    let shift = stored
        .shifts
        .iter()
        .find(|s| s.staff_id.as_ref() == Some(&jane))
        .unwrap()
        .id
        .to_string();

    cli(&board)
        .args(["--as", "jane", "roster"])
        .assert()
        .success()
        .stdout(predicate::str::contains(shift.as_str()));

    cli(&board)
        .args(["--as", "alice", "clock-in", "--shift", &shift])
        .assert()
        .failure()
        .stderr(predicate::str::contains("permission denied"));

    cli(&board)
        .args(["--as", "jane", "clock-in", "--shift", &shift])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"clock_in\": \"20"));
    cli(&board)
        .args(["--as", "jane", "clock-out", "--shift", &shift])
        .assert()
        .success();

    cli(&board)
        .args(["--as", "bob", "report", "--staff", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jane"))
        .stdout(predicate::str::contains("alice").not());

    cli(&board).arg("check").assert().code(0);
}

#[test]
fn unknown_method_lists_valid_keys() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("board.json");
    cli(&board)
        .args(["add-user", "--username", "bob", "--role", "admin"])
        .assert()
        .success();
    let schedule = stdout_of(cli(&board).args(["--as", "bob", "create-schedule", "--name", "S"]));

    cli(&board)
        .args(["--as", "bob", "auto-schedule", "--schedule", &schedule, "--method", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("even, minimal, balanced"));
}

#[test]
fn admin_commands_need_acting_admin() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("board.json");
    cli(&board)
        .args(["add-user", "--username", "jane"])
        .assert()
        .success();

    cli(&board)
        .args(["create-schedule", "--name", "S"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--as"));
    cli(&board)
        .args(["--as", "jane", "create-schedule", "--name", "S"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn check_flags_overlaps_with_exit_code_two() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("board.json");
    cli(&board)
        .args(["add-user", "--username", "bob", "--role", "admin"])
        .assert()
        .success();
    cli(&board)
        .args(["add-user", "--username", "jane"])
        .assert()
        .success();
    let schedule = stdout_of(cli(&board).args(["--as", "bob", "create-schedule", "--name", "S"]));
    for (start, end) in [
        ("2025-10-01T08:00:00Z", "2025-10-01T12:00:00Z"),
        ("2025-10-01T10:00:00Z", "2025-10-01T14:00:00Z"),
    ] {
        cli(&board)
            .args(["--as", "bob", "assign", "--schedule", &schedule, "--staff", "jane"])
            .args(["--start", start, "--end", end])
            .assert()
            .success();
    }

    cli(&board)
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("jane"));
}

#[test]
fn strategies_are_listed() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("board.json"))
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("even"))
        .stdout(predicate::str::contains("minimal"))
        .stdout(predicate::str::contains("balanced"));
}

#[test]
fn rename_user_then_list() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("board.json");
    for name in ["jane", "alice"] {
        cli(&board)
            .args(["add-user", "--username", name])
            .assert()
            .success();
    }

    cli(&board)
        .args(["rename-user", "--username", "jane", "--new-name", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already taken"));
    cli(&board)
        .args(["rename-user", "--username", "jane", "--new-name", "janet"])
        .assert()
        .success();

    cli(&board)
        .arg("list-users")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"janet\""))
        .stdout(predicate::str::contains("\"jane\"").not());
}
