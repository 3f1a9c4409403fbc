//! End-to-end checks of the process contract: exit codes, the
//! `===RESULT===` marker, and the JSON result line. None of these reach
//! the network — they all fail validation first.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("imagefx").unwrap()
}

#[test]
fn missing_cookie_fails_with_result_line() {
    cmd()
        .args(["--prompt", "a red circle"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("===RESULT==="))
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("cookie"));
}

#[test]
fn missing_prompt_fails_with_result_line() {
    cmd()
        .args(["--cookie", "SID=abc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("prompt"));
}

#[test]
fn trailing_unpaired_argument_is_ignored() {
    // The dangling --cookie never becomes an option, so the run fails on
    // the missing cookie.
    cmd()
        .args(["--prompt", "a red circle", "--cookie"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("cookie"));
}

#[test]
fn result_record_is_the_last_line() {
    let output = cmd().args(["--prompt", "a red circle"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(lines.len() >= 2);
    assert_eq!(lines[lines.len() - 2], "===RESULT===");

    let record: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
    assert_eq!(record["success"], false);
    assert!(record["error"].as_str().unwrap().contains("--cookie"));
    assert!(record.get("path").is_none());
    assert!(record.get("count").is_none());
}

#[test]
fn no_arguments_at_all() {
    cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""success":false"#));
}
