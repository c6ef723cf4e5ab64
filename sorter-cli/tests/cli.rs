//! Integration tests for global options and the informational commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sort"))
        .stdout(predicate::str::contains("undo"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sorter "));
}

#[test]
fn test_show_data_dir_flag_and_env() {
    let env = TestEnv::new();
    env.command()
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(format!("{}\n", env.data_dir.display()));

    env.command_bare()
        .env("SORTER_DATA_DIR", &env.data_dir)
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(format!("{}\n", env.data_dir.display()));
}

#[test]
fn test_categories_lists_table() {
    let env = TestEnv::new();
    env.command()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("document\t"))
        .stdout(predicate::str::contains("pdf"))
        .stdout(predicate::function(|out: &str| out.lines().count() == 13));
}

#[test]
fn test_categories_single_and_unknown() {
    let env = TestEnv::new();
    env.command()
        .args(["categories", "--category", "Audio"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("audio\t"))
        .stdout(predicate::str::contains("mp3"));

    env.command()
        .args(["categories", "--category", "spaceships"])
        .assert()
        .code(4);
}

#[test]
fn test_validate_config_file() {
    let env = TestEnv::new();
    let good = env.write_config("group: true\nfile_types: [pdf]\n");
    env.command()
        .arg("validate")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    env.command().arg("validate").assert().success();

    let bad = env.root().join("bad.yaml");
    std::fs::write(&bad, "ownership_marker: owned\n").unwrap();
    env.command()
        .arg("validate")
        .arg(&bad)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_validate_missing_file() {
    let env = TestEnv::new();
    env.command()
        .arg("validate")
        .arg(env.root().join("nope.yaml"))
        .assert()
        .code(4);
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sorter"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let env = TestEnv::new();
    env.command_bare().arg("shuffle").assert().failure();
}
