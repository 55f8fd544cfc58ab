//! Gemini-style generateContent REST adapter for the language-model port.

use super::{AdapterConfigError, optional_env, required_env};
use crate::analytics::ports::{LanguageModel, LanguageModelResult, ModelRequest, ModelUnavailable};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the generateContent adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    api_key: String,
    endpoint: String,
    timeout_ms: u64,
}

impl GeminiConfig {
    /// Creates a configuration with the default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the service endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// Requires `GEMINI_API_KEY`; honours `GEMINI_API_ENDPOINT` when set.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterConfigError::MissingVariable`] when the API key is
    /// unset.
    pub fn from_env() -> Result<Self, AdapterConfigError> {
        let api_key = required_env("GEMINI_API_KEY")?;
        let mut config = Self::new(api_key);
        if let Some(endpoint) = optional_env("GEMINI_API_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }
}

/// One content part in the generateContent wire format.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Language-model adapter over the generateContent REST surface.
#[derive(Debug, Clone)]
pub struct GeminiLanguageModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiLanguageModel {
    /// Creates an adapter with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterConfigError::HttpClient`] when the client cannot be
    /// constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, AdapterConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| AdapterConfigError::HttpClient(err.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl LanguageModel for GeminiLanguageModel {
    async fn generate(&self, request: &ModelRequest) -> LanguageModelResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint,
            request.model()
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt().to_owned(),
                }],
            }],
        };

        debug!(model = request.model(), "sending generate request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ModelUnavailable(format!("request failed: {err}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ModelUnavailable(format!("failed to read response body: {err}")))?;

        if !status.is_success() {
            warn!(%status, model = request.model(), "language model returned error status");
            return Err(ModelUnavailable(format!("status {status}: {text}")));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|err| ModelUnavailable(format!("malformed response: {err}")))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|generated| !generated.is_empty())
            .ok_or_else(|| ModelUnavailable("response carried no generated text".to_owned()))
    }
}
