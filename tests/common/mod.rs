#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir` with a throwaway identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git should be installed");
    assert!(status.success(), "git {args:?} failed");
}

/// A repo with `origin/main` and `origin/feature-x` remote-tracking refs,
/// where feature-x modifies README.md.
pub fn repo_with_branches() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    git(path, &["init", "-q"]);
    fs::write(path.join("README.md"), "hello\n").unwrap();
    git(path, &["add", "README.md"]);
    git(path, &["commit", "-q", "-m", "init"]);
    git(path, &["update-ref", "refs/remotes/origin/main", "HEAD"]);

    fs::write(path.join("README.md"), "hello, world\n").unwrap();
    git(path, &["commit", "-q", "-am", "touch readme"]);
    git(path, &["update-ref", "refs/remotes/origin/feature-x", "HEAD"]);

    // same tree as main, so main...same is empty
    git(path, &["update-ref", "refs/remotes/origin/same", "refs/remotes/origin/main"]);

    dir
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
    .to_string()
}
