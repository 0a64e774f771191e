//! CLI Integration Tests
//!
//! Exit codes and end-to-end runs of the binary with git disabled.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn soonsal() -> Command {
    Command::cargo_bin("soonsal-deploy").unwrap()
}

fn site(temp: &TempDir) -> std::path::PathBuf {
    let repo = temp.path().join("site");
    std::fs::create_dir_all(repo.join("cardnews")).unwrap();
    std::fs::write(
        repo.join("index.html"),
        "<p>Latest &mdash; 2026.02.27</p>\n<div class=\"today\">\n  <div class=\"today-title\">2026.02.27 전체 콘텐츠</div>\n  <div class=\"today-grid\" style=\"grid-template-columns:1fr; gap:10px;\">\n  </div>\n</div>\n",
    )
    .unwrap();
    repo
}

#[test]
fn test_missing_arguments_exit_1() {
    let temp = TempDir::new().unwrap();
    soonsal()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_no_valid_files_exit_1() {
    let temp = TempDir::new().unwrap();
    let repo = site(&temp);
    let input = temp.path().join("notes.html");
    std::fs::write(&input, "<html></html>").unwrap();

    soonsal()
        .current_dir(temp.path())
        .arg("--no-git")
        .arg("--repo")
        .arg(&repo)
        .arg(&input)
        .assert()
        .code(1);
}

#[test]
fn test_deploy_without_git() {
    let temp = TempDir::new().unwrap();
    let repo = site(&temp);
    let input = temp.path().join("순살카드뉴스_20260302.html");
    std::fs::write(&input, "<title>순살카드뉴스 — 이번 주 시황</title>").unwrap();

    soonsal()
        .current_dir(temp.path())
        .arg("--no-git")
        .arg("--repo")
        .arg(&repo)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("cardnews/2026/0302.html"))
        .stdout(predicate::str::contains("Add 순살카드뉴스 0302"));

    assert!(repo.join("cardnews/2026/0302.html").exists());
    let home = std::fs::read_to_string(repo.join("index.html")).unwrap();
    assert!(home.contains("순살카드뉴스 · 이번 주 시황"));
}

#[test]
fn test_flags_read_from_environment() {
    let temp = TempDir::new().unwrap();
    let repo = site(&temp);
    let input = temp.path().join("순살카드뉴스_20260302.html");
    std::fs::write(&input, "<title>순살카드뉴스 — 이번 주 시황</title>").unwrap();

    soonsal()
        .current_dir(temp.path())
        .env("SOONSAL_NO_GIT", "true")
        .env("SOONSAL_REPO", &repo)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexes updated (git skipped)"));

    assert!(repo.join("cardnews/2026/0302.html").exists());
}
