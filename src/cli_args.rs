use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// CLI options. Every required value can also come from the environment,
/// which is how a CI job usually drives this tool.
#[derive(Parser, Debug, Default)]
#[command(
    name = "pr-describer",
    version,
    about = "Draft a pull request description from a branch diff and write it to GitHub"
)]
pub struct Cli {
    /// Base branch of the pull request (e.g. main)
    #[arg(long, env = "BASE_BRANCH")]
    pub base_branch: Option<String>,

    /// Head branch of the pull request
    #[arg(long, env = "HEAD_BRANCH")]
    pub head_branch: Option<String>,

    /// Pull request number to update
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<String>,

    /// Repository as owner/name
    #[arg(long = "repo", env = "REPO_NAME")]
    pub repo: Option<String>,

    /// GitHub token used to update the pull request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Key sent in the `api-key` header of the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Full URL of the chat completion endpoint
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Git remote the branches are read from (default: origin)
    #[arg(long)]
    pub remote: Option<String>,

    /// GitHub REST API base URL (default: https://api.github.com)
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Per-request timeout for both HTTP calls, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// How many times a transient HTTP failure is retried
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Optional TOML config file (default: ~/.config/pr-describer.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the generated description instead of updating the pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Exit non-zero when any stage fails
    #[arg(long)]
    pub strict: bool,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
