//! OpenRouter API client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use agora_core::ServiceHealth;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

use crate::completion::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::TRACING_TARGET_CLIENT;

/// OpenRouter chat-completions client with client-side rate limiting.
///
/// Cloning is cheap; all clones share the same HTTP connection pool and rate
/// limiter.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: LlmConfig,
    rate_limiter: DefaultDirectRateLimiter,
}

impl LlmClient {
    /// Creates a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            model = %config.model,
            rate_limit = config.rate_limit,
            "building OpenRouter client"
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)?;

        let quota = Quota::per_second(
            config
                .rate_limit
                .try_into()
                .map_err(|_| Error::Config("rate limit must be non-zero".into()))?,
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                rate_limiter: RateLimiter::direct(quota),
            }),
        })
    }

    /// Creates a new client from an API key with default configuration.
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(LlmConfig::new(api_key))
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.inner.config.model
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.inner.config
    }

    /// Sends a chat-completion request.
    ///
    /// Waits on the client-side rate limiter before dispatching, so bursts of
    /// analysis runs spread out instead of tripping the upstream limiter.
    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse> {
        self.inner.rate_limiter.until_ready().await;

        let request = ChatRequest {
            model: self.inner.config.model.clone(),
            messages,
            temperature: self.inner.config.temperature,
            stream: false,
        };

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            model = %request.model,
            message_count = request.messages.len(),
            "sending chat completion request"
        );

        let url = format!("{}/chat/completions", self.inner.config.base_url);
        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(&self.inner.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                status = status.as_u16(),
                "chat completion request failed"
            );
            return Err(Error::Api { status, message });
        }

        let body = response.bytes().await?;
        let completion: ChatResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = completion.usage {
            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }

        Ok(completion)
    }

    /// Convenience wrapper: one system prompt, one user prompt, text out.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];
        let response = self.chat_completion(messages).await?;

        response
            .content()
            .map(ToOwned::to_owned)
            .ok_or(Error::EmptyResponse)
    }

    /// Performs a health check against the models endpoint.
    pub async fn health_check(&self) -> ServiceHealth {
        let url = format!("{}/models", self.inner.config.base_url);
        let started = Instant::now();

        let result = self
            .inner
            .http
            .get(&url)
            .bearer_auth(&self.inner.config.api_key)
            .send()
            .await;

        let elapsed = started.elapsed();
        match result {
            Ok(response) if response.status().is_success() => {
                ServiceHealth::healthy().with_response_time(elapsed)
            }
            Ok(response) => ServiceHealth::degraded(format!(
                "models endpoint answered {}",
                response.status()
            ))
            .with_response_time(elapsed),
            Err(error) => {
                ServiceHealth::unhealthy(error.to_string()).with_response_time(elapsed)
            }
        }
    }
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("base_url", &self.inner.config.base_url)
            .field("model", &self.inner.config.model)
            .finish_non_exhaustive()
    }
}
