//! Smoke tests to verify command wiring without a database

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn talentdash() -> Command {
    let mut cmd = Command::cargo_bin("talentdash").unwrap();
    // Keep the developer's own config and credentials out of the tests
    cmd.env_remove("TALENTDASH_USER")
        .env_remove("TALENTDASH_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_top_level_help() {
    talentdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("candidate"));
}

#[test]
fn test_report_help_lists_catalog() {
    talentdash()
        .args(["report", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top-skills"))
        .stdout(predicate::str::contains("skills-salary-benchmark"));
}

#[test]
fn test_unknown_report_is_rejected() {
    talentdash()
        .args(["report", "best-vibes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_candidate_find_rejects_bad_ed_level() {
    talentdash()
        .args(["candidate", "find", "--skill", "Python", "--ed-level", "masters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ed-level"));
}

#[test]
fn test_job_set_salary_help() {
    talentdash()
        .args(["job", "set-salary", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New range"));
}

#[test]
fn test_completions_need_no_config() {
    talentdash()
        .current_dir(tempfile::tempdir().unwrap().path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("talentdash"));
}

#[test]
fn test_missing_config_file_fails_cleanly() {
    talentdash()
        .args(["--config", "/nonexistent/talentdash.toml", "recruiter", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_mutation_without_user_asks_for_login() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        "[database]\nhost = \"127.0.0.1\"\nport = 1\nuser = \"dash\"\npassword = \"pw\"\ndatabase = \"none\"\n"
    )
    .unwrap();

    talentdash()
        .arg("--config")
        .arg(config.path())
        .args(["recruiter", "add", "Jane Roe", "--contact", "jane@acme.test", "--company", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user"));
}
