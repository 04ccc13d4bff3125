pub mod azure_openai;
pub mod prompt_builder;
pub mod prompts;

use crate::git::Diff;
use crate::retry::{Transient, is_retryable_status};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to completion endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("completion endpoint returned an empty description")]
    EmptyCompletion,
}

impl Transient for DescribeError {
    fn is_transient(&self) -> bool {
        match self {
            DescribeError::Transport(_) => true,
            DescribeError::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Trait for talking to an LLM that drafts pull request descriptions.
pub trait LlmClient {
    /// Turn a diff into description text, trimmed and non-empty.
    fn generate_pr_description(&self, diff: &Diff) -> Result<String, DescribeError>;
}
