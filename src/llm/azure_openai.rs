use super::{DescribeError, LlmClient, prompt_builder};
use crate::git::Diff;
use crate::retry::RetryPolicy;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters are fixed for every request.
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 700;

/// Minimal request/response structs for the Chat Completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    // Azure returns null content when a content filter trips
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Azure OpenAI deployment addressed by its full chat-completions URL and
/// authenticated with a static `api-key` header.
pub struct AzureOpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    retry: RetryPolicy,
}

impl AzureOpenAiClient {
    pub fn new(
        api_key: String,
        endpoint: String,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, DescribeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DescribeError::Client)?;

        Ok(AzureOpenAiClient {
            client,
            api_key,
            endpoint,
            retry,
        })
    }

    fn call_chat(&self, req: &ChatRequest) -> Result<String, DescribeError> {
        log::info!("Requesting PR description from {}", self.endpoint);
        log::debug!(
            "Headers: content-type=application/json, api-key={}",
            redact(&self.api_key)
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(req)
            .send()
            .map_err(DescribeError::Transport)?;

        let status = resp.status();
        let text = resp.text().map_err(DescribeError::Transport)?;

        if status.as_u16() != 200 {
            return Err(DescribeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_content(&text)
    }
}

/// Validate the response shape and pull out the first choice's text.
fn extract_content(body: &str) -> Result<String, DescribeError> {
    let chat_resp: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DescribeError::MalformedResponse(e.to_string()))?;

    if let Some(usage) = &chat_resp.usage {
        log::info!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }

    let content = chat_resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DescribeError::MalformedResponse("no choices returned".into()))?
        .message
        .content
        .ok_or_else(|| DescribeError::MalformedResponse("first choice has no content".into()))?;

    let content = content.trim();
    if content.is_empty() {
        return Err(DescribeError::EmptyCompletion);
    }

    Ok(content.to_string())
}

impl LlmClient for AzureOpenAiClient {
    fn generate_pr_description(&self, diff: &Diff) -> Result<String, DescribeError> {
        let prompts = prompt_builder::pr_description_prompt(diff);

        log::trace!(
            "PR description prompt:\n{}",
            truncate(&prompts.user, 3500)
        );

        let req = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: prompts.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        self.retry.run("completion request", || self.call_chat(&req))
    }
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...\n[truncated {} bytes]", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_trims_first_choice() {
        let body = r#"{"choices":[{"message":{"content":" Hello world "}},{"message":{"content":"second"}}]}"#;

        assert_eq!(extract_content(body).unwrap(), "Hello world");
    }

    #[test]
    fn missing_choices_is_malformed() {
        let err = extract_content(r#"{"id":"x"}"#).unwrap_err();

        assert!(matches!(err, DescribeError::MalformedResponse(_)));
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = extract_content(r#"{"choices":[]}"#).unwrap_err();

        assert!(matches!(err, DescribeError::MalformedResponse(_)));
    }

    #[test]
    fn null_content_is_malformed() {
        let err = extract_content(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();

        assert!(matches!(err, DescribeError::MalformedResponse(_)));
    }

    #[test]
    fn blank_content_is_empty_completion() {
        let err = extract_content(r#"{"choices":[{"message":{"content":"  \n "}}]}"#).unwrap_err();

        assert!(matches!(err, DescribeError::EmptyCompletion));
    }

    #[test]
    fn request_serializes_fixed_parameters() {
        let req = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: "hi".into(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["max_tokens"], 700);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "héllo";
        let out = truncate(s, 2);

        assert_eq!(out, "h...\n[truncated 5 bytes]");
    }

    #[test]
    fn redact_keeps_prefix_only() {
        assert_eq!(redact("sk-1234567"), "sk-1***");
    }
}
