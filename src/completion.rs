//! The external generative capability: a prompt-in, text-out completion
//! call, plus the production OpenAI-compatible HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::CompletionError;

/// The one capability the engine needs from a language model. Calls are
/// blocking for the traversal that issues them; failures propagate unchanged
/// and are never retried here.
#[async_trait]
pub trait Completion: Send + Sync {
  async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CompletionError>;
}

/// Configuration for [OpenAiClient].
#[derive(Debug, Clone)]
pub struct CompletionConfig {
  pub api_key: String,
  /// Base URL of an OpenAI-compatible completions API.
  pub base_url: String,
  pub model: String,
  pub timeout: Duration,
}

impl CompletionConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: "https://api.openai.com".to_string(),
      model: "gpt-3.5-turbo-instruct".to_string(),
      timeout: Duration::from_secs(60),
    }
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
  model: &'a str,
  prompt: &'a str,
  temperature: f32,
  max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
  choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
  text: String,
}

/// Client for an OpenAI-compatible `/v1/completions` endpoint. Temperature
/// is pinned to 0 so traversal is deterministic for a fixed tree and
/// transcript.
pub struct OpenAiClient {
  config: CompletionConfig,
  client: reqwest::Client,
}

impl OpenAiClient {
  pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(Self { config, client })
  }
}

#[async_trait]
impl Completion for OpenAiClient {
  async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CompletionError> {
    let url = format!(
      "{}/v1/completions",
      self.config.base_url.trim_end_matches('/')
    );
    let request = CompletionRequest {
      model: &self.config.model,
      prompt,
      temperature: 0.0,
      max_tokens,
    };
    debug!(model = %self.config.model, max_tokens, "completion request");

    let response = self
      .client
      .post(&url)
      .bearer_auth(&self.config.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(CompletionError::Service {
        status: status.as_u16(),
        message,
      });
    }

    let body: CompletionResponse = response.json().await?;
    body
      .choices
      .into_iter()
      .next()
      .map(|c| c.text)
      .ok_or(CompletionError::EmptyResponse)
  }
}
