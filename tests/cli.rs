#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(state: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roulement-cli").unwrap();
    cmd.arg("--state").arg(state);
    cmd
}

fn seed(state: &Path) {
    for (id, name) in [("a", "Alice"), ("b", "Bruno")] {
        cli(state)
            .args(["add-worker", "--name", name, "--id", id])
            .assert()
            .success()
            .stdout(predicate::str::contains(id));
    }
}

#[test]
fn conflict_then_move_resolves_it() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planning.json");
    seed(&state);

    for shift in ["early", "late"] {
        cli(&state)
            .args(["set", "--date", "2024-05-01", "--shift", shift, "--workers", "a"])
            .assert()
            .success();
    }

    cli(&state)
        .args(["check", "--period", "2024-05-01"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Alice (a) est affecté à plusieurs postes le 2024-05-01 : early, late",
        ));

    cli(&state)
        .args([
            "move",
            "--from-date",
            "2024-05-01",
            "--from-shift",
            "late",
            "--index",
            "0",
            "--to-date",
            "2024-05-02",
            "--to-shift",
            "late",
        ])
        .assert()
        .success();

    cli(&state)
        .args(["check", "--period", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));

    cli(&state)
        .args(["show", "--period", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-02 late  12:30-21:30 | Alice"))
        .stdout(predicate::str::contains("2024-05-01 late  12:30-21:30 | -"));
}

#[test]
fn invalid_move_is_reported() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planning.json");
    seed(&state);

    cli(&state)
        .args([
            "move",
            "--from-date",
            "2024-05-01",
            "--from-shift",
            "early",
            "--index",
            "0",
            "--to-date",
            "2024-05-02",
            "--to-shift",
            "early",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid move"));
}

#[test]
fn suggest_apply_fills_open_week() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planning.json");
    seed(&state);
    cli(&state)
        .args(["set", "--date", "2024-04-28", "--shift", "early", "--workers", "a"])
        .assert()
        .success();

    cli(&state)
        .args(["suggest", "--period", "2024-05-01", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04-28 mid   -> Bruno"))
        .stdout(predicate::str::contains("applied 20 suggestion(s)"));

    cli(&state)
        .args(["load", "--period", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice | 11"))
        .stdout(predicate::str::contains("Bruno | 10"));
}

#[test]
fn templates_capture_and_apply() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("planning.json");
    seed(&state);
    cli(&state)
        .args(["set", "--date", "2024-05-01", "--shift", "mid", "--workers", "b,a"])
        .assert()
        .success();

    cli(&state)
        .args(["capture", "--name", "standard", "--week", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("captured 1 assignment(s)"));

    cli(&state)
        .args(["apply", "--name", "standard", "--week", "2024-05-08"])
        .assert()
        .success();

    cli(&state)
        .args(["show", "--period", "2024-05-08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-08 mid   11:00-20:00 | Bruno, Alice"));

    cli(&state)
        .args(["apply", "--name", "absent", "--week", "2024-05-08"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown template: absent"));
}
