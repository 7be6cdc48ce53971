//! Generic client for OpenAI-compatible APIs.

use crate::openai_compat::{ChatResponse, conversions};
use async_trait::async_trait;
use lullaby_error::{ProviderError, ProviderErrorKind};
use lullaby_interface::GenerationClient;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default endpoint for the OpenAI chat completions API.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default timeout for a single provider round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Generic client for any OpenAI-compatible chat completions API.
///
/// The model is chosen per call, so one client can serve every stage.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    base_url: String,
    provider_name: &'static str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `base_url` - Full URL of the chat completions endpoint
    /// * `provider_name` - Name of the provider (for logging/tracing)
    /// * `timeout` - Upper bound for one request, including the response body
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    #[instrument(skip_all, fields(provider = provider_name))]
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        provider_name: &'static str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ProviderError::new(ProviderErrorKind::Builder(format!(
                "Failed to create HTTP client: {}",
                e
            )))
        })?;
        let base_url = base_url.into();

        debug!(
            provider = provider_name,
            url = %base_url,
            timeout_secs = timeout.as_secs(),
            "Created OpenAI-compatible client"
        );

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            provider_name,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Creates a client for the public OpenAI endpoint.
    pub fn openai(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(api_key, OPENAI_CHAT_COMPLETIONS_URL, "openai", DEFAULT_TIMEOUT)
    }

    /// Sets the sampling temperature sent with every request.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the completion token cap sent with every request.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one prompt and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, the provider answers
    /// with a non-success status, or the response carries no text.
    #[instrument(skip(self, prompt), fields(provider = self.provider_name, model = %model, prompt_len = prompt.len()))]
    pub async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        let chat_request =
            conversions::to_chat_request(prompt, model, self.temperature, self.max_tokens)?;

        debug!(
            provider = self.provider_name,
            model = %model,
            message_count = chat_request.messages().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.provider_name, error = ?e, "HTTP request failed");
                ProviderError::new(transport_error_kind(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                error = %error_text,
                "API error"
            );

            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            }));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            if e.is_timeout() {
                ProviderError::new(transport_error_kind(&e))
            } else {
                ProviderError::new(ProviderErrorKind::ResponseParsing(format!(
                    "Failed to parse JSON: {}",
                    e
                )))
            }
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            total_tokens = ?chat_response.usage.as_ref().and_then(|u| u.total_tokens),
            "Received response"
        );

        conversions::from_chat_response(&chat_response)
    }
}

fn transport_error_kind(err: &reqwest::Error) -> ProviderErrorKind {
    if err.is_timeout() {
        ProviderErrorKind::Timeout(err.to_string())
    } else {
        ProviderErrorKind::Http(format!("Request failed: {}", err))
    }
}

#[async_trait]
impl GenerationClient for OpenAICompatibleClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        self.complete(prompt, model).await
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }
}
