//! Azure OpenAI provider implementation

use super::config::AzureConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::providers::openai::{convert::to_openai_request, stream::create_stream};
use crate::types::{GenerateRequest, GenerateStream, Headers};
use async_trait::async_trait;
use reqwest::Client;

/// Azure OpenAI provider. The request `model` is the deployment name.
pub struct AzureOpenAIProvider {
    config: AzureConfig,
    client: Client,
}

impl AzureOpenAIProvider {
    pub const ENDPOINT_ENV: &'static str = "AZURE_OPENAI_ENDPOINT";
    pub const API_KEY_ENV: &'static str = "AZURE_OPENAI_API_KEY";
    pub const API_VERSION_ENV: &'static str = "AZURE_OPENAI_API_VERSION";

    /// Create a new Azure OpenAI provider
    pub fn new(config: AzureConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(Self::ENDPOINT_ENV).map_err(|_| {
            Error::config_error(format!("{} is not set", Self::ENDPOINT_ENV))
        })?;
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("azure".to_string()))?;

        let mut config = AzureConfig::new(endpoint, api_key);
        if let Ok(version) = std::env::var(Self::API_VERSION_ENV) {
            if !version.trim().is_empty() {
                config = config.with_api_version(version.trim());
            }
        }

        Self::new(config)
    }

    pub fn config(&self) -> &AzureConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for AzureOpenAIProvider {
    fn provider_id(&self) -> &str {
        "azure"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();

        headers.insert("api-key", self.config.api_key.clone());
        headers.insert("Content-Type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        if request.model.trim().is_empty() {
            return Err(Error::config_error("No deployment selected"));
        }

        let url = self.config.completions_url(&request.model);
        let body = to_openai_request(&request, true);

        #[cfg(feature = "tracing")]
        tracing::debug!(deployment = %request.model, messages = request.messages.len(), "azure stream request");

        let headers = self.build_headers(request.options.headers.as_ref());

        let req_builder = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body);

        let event_source = reqwest_eventsource::EventSource::new(req_builder)
            .map_err(|e| Error::stream_error(format!("Failed to create event source: {}", e)))?;

        Ok(create_stream(event_source, "Azure OpenAI"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AzureOpenAIProvider {
        AzureOpenAIProvider::new(AzureConfig::new("https://res.openai.azure.com", "secret")).unwrap()
    }

    #[test]
    fn test_api_key_header() {
        let headers = provider().build_headers(None);
        assert_eq!(headers.get("api-key"), Some("secret"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert!(headers.get("Authorization").is_none());
    }

    #[test]
    fn test_custom_headers_merged() {
        let mut custom = Headers::new();
        custom.insert("x-ms-client-request-id", "abc");
        let headers = provider().build_headers(Some(&custom));
        assert_eq!(headers.get("x-ms-client-request-id"), Some("abc"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_placeholder_config_fails_construction() {
        let result = AzureOpenAIProvider::new(AzureConfig::new(
            "https://res.openai.azure.com",
            "<YOUR_AZURE_OPENAI_KEY>",
        ));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_deployment_rejected() {
        let result = provider()
            .stream(GenerateRequest::new("", Vec::new()))
            .await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
