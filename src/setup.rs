use log::debug;
use crate::config::Config;
use crate::git::GitDiff;
use crate::github::{GitHubClient, PrTarget, UpdateError};
use crate::llm::DescribeError;
use crate::llm::azure_openai::AzureOpenAiClient;
use crate::retry::RetryPolicy;

pub fn retry_policy(cfg: &Config) -> RetryPolicy {
    RetryPolicy::new(cfg.max_retries, cfg.retry_delay)
}

pub fn build_diff_source(cfg: &Config) -> GitDiff {
    GitDiff::new(cfg.remote.clone())
}

/// Build the completion client based on config.
pub fn build_llm_client(cfg: &Config) -> Result<AzureOpenAiClient, DescribeError> {
    debug!("Using AzureOpenAiClient with endpoint: {}", cfg.endpoint);

    AzureOpenAiClient::new(
        cfg.api_key.clone(),
        cfg.endpoint.clone(),
        cfg.timeout,
        retry_policy(cfg),
    )
}

pub fn build_github_client(cfg: &Config) -> Result<GitHubClient, UpdateError> {
    debug!("Using GitHub API at {}", cfg.github_api_url);

    GitHubClient::new(
        cfg.github_api_url.clone(),
        cfg.github_token.clone(),
        cfg.timeout,
        retry_policy(cfg),
    )
}

pub fn pr_target(cfg: &Config) -> PrTarget {
    PrTarget {
        repo: cfg.repo.clone(),
        number: cfg.pr_number,
    }
}
