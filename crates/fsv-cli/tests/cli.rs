//! End-to-end tests for the `fsvisit` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fsvisit() -> Command {
    let mut cmd = Command::cargo_bin("fsvisit").unwrap();
    cmd.env_remove("FSVISIT_PATH")
        .env_remove("FSVISIT_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// root/{a.txt, b.log, sub/c.txt}
fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.log"), "b").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
    dir
}

fn root_str(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_owned()
}

fn expected_transcript(root: &str) -> String {
    format!(
        "Search started.\n\
         Directory found: {root}/sub\n\
         Search started.\n\
         File found: {root}/sub/c.txt\n\
         Filtered file found: {root}/sub/c.txt\n\
         {root}/sub/c.txt\n\
         Search finished.\n\
         File found: {root}/a.txt\n\
         Filtered file found: {root}/a.txt\n\
         {root}/a.txt\n\
         File found: {root}/b.log\n\
         Search finished.\n"
    )
}

#[test]
fn test_walk_prints_interleaved_transcript() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .args(["--path", &root])
        .assert()
        .success()
        .stdout(expected_transcript(&root));
}

#[test]
fn test_prompts_for_path_on_stdin() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .write_stdin(format!("{root}\n"))
        .assert()
        .success()
        .stdout(format!("Enter the directory path:\n{}", expected_transcript(&root)));
}

#[test]
fn test_path_from_environment() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .env("FSVISIT_PATH", &root)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(format!("{root}/sub/c.txt\n{root}/a.txt\n"));
}

#[test]
fn test_empty_input_is_rejected() {
    fsvisit()
        .write_stdin("\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("the directory path cannot be empty"));
}

#[test]
fn test_missing_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    fsvisit()
        .arg("--path")
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist or is not a valid directory"));
}

#[test]
fn test_file_path_is_rejected() {
    let dir = sample_tree();

    fsvisit()
        .arg("--path")
        .arg(dir.path().join("a.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid directory"));
}

#[test]
fn test_default_rules_exclude_text4_and_abort_folder() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("text3.txt"), "").unwrap();
    fs::write(dir.path().join("text4.txt"), "").unwrap();
    fs::create_dir(dir.path().join("TestAbortFolder")).unwrap();
    fs::write(dir.path().join("TestAbortFolder/hidden.txt"), "").unwrap();
    let root = root_str(&dir);

    fsvisit()
        .args(["--path", &root])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Excluding file: {root}/text4.txt")))
        .stdout(predicate::str::contains(format!(
            "Excluding directory: {root}/TestAbortFolder"
        )))
        .stdout(predicate::str::contains(format!("{root}/text3.txt\n")))
        .stdout(predicate::str::contains("hidden.txt").not())
        .stdout(predicate::str::contains(format!("Filtered file found: {root}/text4.txt")).not());
}

#[test]
fn test_all_flag_accepts_every_entry() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .args(["--path", &root, "--all", "--quiet"])
        .assert()
        .success()
        .stdout(format!("{root}/sub\n{root}/sub/c.txt\n{root}/a.txt\n{root}/b.log\n"));
}

#[test]
fn test_suffix_override() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .args(["--path", &root, "--suffix", ".log", "--quiet"])
        .assert()
        .success()
        .stdout(format!("{root}/b.log\n"));
}

#[test]
fn test_abort_on_stops_the_level() {
    let dir = sample_tree();
    let root = root_str(&dir);

    fsvisit()
        .args(["--path", &root, "--abort-on", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Aborting at: {root}/a.txt")))
        .stdout(predicate::str::contains("b.log").not())
        .stdout(predicate::str::contains(format!("{root}/sub/c.txt\n")));
}

#[test]
fn test_config_file_rules() {
    let dir = sample_tree();
    let root = root_str(&dir);
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("fsvisit.json");
    fs::write(
        &config_path,
        r#"{ "rules": { "include_suffix": null, "exclude_dirs": ["sub"] } }"#,
    )
    .unwrap();

    fsvisit()
        .args(["--path", &root, "--quiet", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(format!("{root}/a.txt\n{root}/b.log\n"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = sample_tree();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("fsvisit.json");
    fs::write(&config_path, r#"{ "rules": { "abort_on": [""] } }"#).unwrap();

    fsvisit()
        .arg("--path")
        .arg(dir.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rules.abort_on"));
}

#[test]
fn test_summary_is_printed() {
    let dir = sample_tree();

    fsvisit()
        .arg("--path")
        .arg(dir.path())
        .args(["--quiet", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk Summary"))
        .stdout(predicate::str::contains("Directory levels:   2"))
        .stdout(predicate::str::contains("Items yielded:      2 (0 directories, 2 files)"));
}

#[test]
fn test_help_lists_options() {
    fsvisit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--abort-on"));
}
