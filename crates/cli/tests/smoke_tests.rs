use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_line_census"))
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("main.go"),
        "package main\n\n// entry\nfunc main() {\n\t/* noop */\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("build.sh"), "#!/bin/sh\n# build\nmake\n").unwrap();
    dir
}

#[test]
fn shows_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("line_census"))
        .stdout(predicate::str::contains("--max-line-len"));
}

#[test]
fn prints_language_table() {
    let dir = project();
    bin()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Go"))
        .stdout(predicate::str::contains("Shell"))
        .stdout(predicate::str::is_match(r"TOTAL\s+2\s+1\s+3\s+5").unwrap());
}

#[test]
fn prints_json_with_line_numbers() {
    let dir = project();
    let output = bin()
        .args(["--format", "json", "--line-numbers"])
        .arg(dir.path().join("main.go"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"]["files"], 1);
    assert_eq!(json["files"][0]["language"], "Go");
    assert_eq!(json["files"][0]["lines"]["code"], serde_json::json!([1, 4, 6]));
    assert_eq!(json["files"][0]["lines"]["comment"], serde_json::json!([3, 5]));
}

#[test]
fn by_file_lists_each_file() {
    let dir = project();
    bin()
        .arg("--by-file")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("main.go"))
        .stdout(predicate::str::contains("build.sh"));
}

#[test]
fn debug_emits_trace_on_stderr() {
    let dir = project();
    bin()
        .arg("--debug")
        .arg(dir.path().join("build.sh"))
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("[CODE, cd:1, cm:0, bk:0"))
        .stderr(predicate::str::contains("comments_line=[2]"));
}

#[test]
fn strict_fails_on_long_line() {
    let dir = project();
    fs::write(dir.path().join("wide.go"), format!("package a\n{}\n", "x".repeat(2048))).unwrap();

    bin()
        .args(["--max-line-len", "1K"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("wide.go"));

    bin()
        .args(["--strict", "--max-line-len", "1K"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn missing_whitelist_fails() {
    let dir = project();
    bin()
        .arg("--whitelist")
        .arg(dir.path().join("nope.txt"))
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("whitelist"));
}

#[test]
fn rejects_bad_map_ext() {
    bin()
        .args(["--map-ext", "novalue"])
        .assert()
        .failure();
}
