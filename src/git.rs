use std::fmt;
use std::path::PathBuf;
use std::process::Command as GitCommand;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to run git {args:?}: {source}")]
    Spawn {
        args: Vec<String>,
        source: std::io::Error,
    },

    #[error("git {args:?} exited with status {code:?}: {stderr}")]
    Exit {
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },
}

/// Name-and-status summary of the files changed between two refs, kept as
/// raw git output. An empty diff means no changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff(String);

impl Diff {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Diff(raw.as_ref().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// One line per changed file.
    pub fn file_count(&self) -> usize {
        self.0.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can summarize the changes between a base and a head branch.
pub trait DiffSource {
    fn diff(&self, base: &str, head: &str) -> Result<Diff, DiffError>;
}

/// Diffs remote-tracking branches with the local `git` binary.
#[derive(Debug, Clone)]
pub struct GitDiff {
    remote: String,
    repo_dir: Option<PathBuf>,
}

impl GitDiff {
    pub fn new(remote: impl Into<String>) -> Self {
        GitDiff {
            remote: remote.into(),
            repo_dir: None,
        }
    }

    /// Run git inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// `<remote>/<base>...<remote>/<head>`: changes on head since it forked from base.
    pub fn range(&self, base: &str, head: &str) -> String {
        format!(
            "{remote}/{base}...{remote}/{head}",
            remote = self.remote
        )
    }

    /// Run a git command and capture stdout as String.
    fn git_output(&self, args: &[&str]) -> Result<String, DiffError> {
        let owned_args = || args.iter().map(|a| a.to_string()).collect::<Vec<_>>();

        let mut cmd = GitCommand::new("git");
        cmd.args(args);
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| DiffError::Spawn {
            args: owned_args(),
            source,
        })?;

        if !output.status.success() {
            return Err(DiffError::Exit {
                args: owned_args(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl DiffSource for GitDiff {
    fn diff(&self, base: &str, head: &str) -> Result<Diff, DiffError> {
        let range = self.range(base, head);
        let raw = self.git_output(&["diff", &range, "--name-status", "--no-color"])?;
        let diff = Diff::new(raw);

        log::info!("Diff {range}:\n{diff}");

        Ok(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_is_trimmed() {
        let diff = Diff::new("\n  M\tREADME.md\nA\tsrc/lib.rs\n\n");

        assert_eq!(diff.as_str(), "M\tREADME.md\nA\tsrc/lib.rs");
        assert_eq!(diff.file_count(), 2);
    }

    #[test]
    fn whitespace_only_output_is_empty() {
        let diff = Diff::new(" \n\t\n");

        assert!(diff.is_empty());
        assert_eq!(diff.file_count(), 0);
    }

    #[test]
    fn range_uses_three_dot_remote_refs() {
        let git = GitDiff::new("origin");

        assert_eq!(git.range("main", "feature-x"), "origin/main...origin/feature-x");
    }
}
