use crate::config::RepoName;
use crate::retry::{RetryPolicy, Transient, is_retryable_status};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("pr-describer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to GitHub failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("GitHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl Transient for UpdateError {
    fn is_transient(&self) -> bool {
        match self {
            UpdateError::Transport(_) => true,
            UpdateError::Status { status, .. } => is_retryable_status(*status),
            UpdateError::Client(_) => false,
        }
    }
}

/// The pull request whose description gets overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTarget {
    pub repo: RepoName,
    pub number: u64,
}

/// Anything that can replace a pull request's description.
pub trait PrUpdater {
    fn update_description(&self, target: &PrTarget, body: &str) -> Result<(), UpdateError>;
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    body: &'a str,
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: String,
    retry: RetryPolicy,
}

impl GitHubClient {
    pub fn new(
        api_base: impl Into<String>,
        token: String,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, UpdateError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(UpdateError::Client)?;

        Ok(GitHubClient {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
            retry,
        })
    }

    pub fn pull_url(&self, target: &PrTarget) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base, target.repo.owner, target.repo.name, target.number
        )
    }

    fn patch_body(&self, url: &str, body: &str) -> Result<(), UpdateError> {
        let resp = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&UpdateBody { body })
            .send()
            .map_err(UpdateError::Transport)?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = body_or_empty(resp.text());
            return Err(UpdateError::Status { status, body });
        }

        Ok(())
    }
}

/// Error bodies are informational; a failed read still reports the status.
fn body_or_empty(text: reqwest::Result<String>) -> String {
    text.unwrap_or_else(|e| {
        log::debug!("Failed to read GitHub error body: {e}");
        String::new()
    })
}

impl PrUpdater for GitHubClient {
    fn update_description(&self, target: &PrTarget, body: &str) -> Result<(), UpdateError> {
        let url = self.pull_url(target);
        log::info!("Updating description of {}#{}", target.repo, target.number);

        self.retry
            .run("PR update", || self.patch_body(&url, body))?;

        log::info!("PR description updated successfully.");
        Ok(())
    }
}
