use crate::Cli;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to read config file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `owner/name` identifier of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl RepoName {
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, name) = value.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(RepoName {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Final resolved configuration, validated once at startup.
#[derive(Clone)]
pub struct Config {
    pub base_branch: String,
    pub head_branch: String,
    pub pr_number: u64,
    pub repo: RepoName,
    pub github_token: String,
    pub api_key: String,
    pub endpoint: String,
    pub remote: String,
    pub github_api_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub dry_run: bool,
    pub strict: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch)
            .field("pr_number", &self.pr_number)
            .field("repo", &self.repo.to_string())
            .field("github_token", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("remote", &self.remote)
            .field("github_api_url", &self.github_api_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("dry_run", &self.dry_run)
            .field("strict", &self.strict)
            .finish()
    }
}

impl Config {
    /// Build the final config from CLI flags (which already carry env vars) and the TOML file.
    ///
    /// Precedence for optional settings:
    ///   1. CLI flag / env var
    ///   2. TOML file (`--config` or `~/.config/pr-describer.toml`)
    ///   3. Hardcoded default
    pub fn from_sources(cli: &Cli) -> Result<Self, ConfigError> {
        let file_cfg = match &cli.config {
            Some(path) => load_file_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => load_file_config(&path)?,
                _ => FileConfig::default(),
            },
        };

        Self::resolve(cli, file_cfg)
    }

    /// Merge CLI values with file values and validate everything in one pass.
    pub fn resolve(cli: &Cli, file_cfg: FileConfig) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let base_branch = required(&cli.base_branch, "BASE_BRANCH", &mut missing);
        let head_branch = required(&cli.head_branch, "HEAD_BRANCH", &mut missing);
        let pr_number = required(&cli.pr_number, "PR_NUMBER", &mut missing);
        let repo = required(&cli.repo, "REPO_NAME", &mut missing);
        let github_token = required(&cli.github_token, "GITHUB_TOKEN", &mut missing);
        let api_key = required(&cli.api_key, "OPENAI_API_KEY", &mut missing);
        let endpoint = required(&cli.endpoint, "AZURE_OPENAI_ENDPOINT", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let pr_number = pr_number
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "PR_NUMBER",
                reason: format!("expected a positive integer, got {pr_number:?}"),
            })?;

        let repo = RepoName::parse(&repo).ok_or_else(|| ConfigError::Invalid {
            name: "REPO_NAME",
            reason: format!("expected owner/name, got {repo:?}"),
        })?;

        let remote = cli
            .remote
            .clone()
            .or(file_cfg.remote)
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

        let github_api_url = cli
            .github_api_url
            .clone()
            .or(file_cfg.github_api_url)
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = cli
            .timeout_secs
            .or(file_cfg.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_retries = cli
            .max_retries
            .or(file_cfg.max_retries)
            .unwrap_or(DEFAULT_MAX_RETRIES);
        let retry_delay_ms = file_cfg.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS);

        Ok(Config {
            base_branch,
            head_branch,
            pr_number,
            repo,
            github_token,
            api_key,
            endpoint: endpoint.trim().to_string(),
            remote,
            github_api_url,
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
            dry_run: cli.dry_run,
            strict: cli.strict,
        })
    }
}

/// Optional settings read from the TOML config file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub remote: Option<String>,
    pub github_api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

/// Treat unset and blank values the same way.
fn required(value: &Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Return `~/.config/pr-describer.toml`
fn default_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("pr-describer.toml"))
}

fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<FileConfig>(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
