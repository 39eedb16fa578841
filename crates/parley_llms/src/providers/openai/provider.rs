//! OpenAI provider implementation

use super::convert::to_openai_request;
use super::stream::create_stream;
use super::types::OpenAIConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateStream, Headers};
use async_trait::async_trait;
use reqwest::Client;

/// OpenAI (or OpenAI-compatible) chat-completions provider
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    /// Environment variable for an alternative base URL
    pub const BASE_URL_ENV: &'static str = "OPENAI_BASE_URL";

    /// Create a new OpenAI provider
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("openai".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("openai".to_string()))?;

        let mut config = OpenAIConfig::new(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url);
            }
        }

        Self::new(config)
    }

    /// Create provider with custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("openai".to_string()))?;

        Self::new(OpenAIConfig::new(api_key).with_base_url(base_url))
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();

        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");

        if let Some(ref org_id) = self.config.organization_id {
            headers.insert("OpenAI-Organization", org_id);
        }

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let url = self.config.completions_url();
        let openai_req = to_openai_request(&request, true);

        #[cfg(feature = "tracing")]
        tracing::debug!(model = %request.model, messages = request.messages.len(), "openai stream request");

        let headers = self.build_headers(request.options.headers.as_ref());

        let req_builder = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&openai_req);

        let event_source = reqwest_eventsource::EventSource::new(req_builder)
            .map_err(|e| Error::stream_error(format!("Failed to create event source: {}", e)))?;

        Ok(create_stream(event_source, "OpenAI"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = OpenAIProvider::new(OpenAIConfig::new("  "));
        assert!(matches!(result, Err(Error::MissingApiKey(_))));
    }

    #[test]
    fn test_bearer_and_org_headers() {
        let provider =
            OpenAIProvider::new(OpenAIConfig::new("sk-test").with_organization_id("org-1")).unwrap();
        let headers = provider.build_headers(None);

        assert_eq!(headers.get("Authorization"), Some("Bearer sk-test"));
        assert_eq!(headers.get("OpenAI-Organization"), Some("org-1"));
        assert_eq!(provider.provider_id(), "openai");
    }
}
