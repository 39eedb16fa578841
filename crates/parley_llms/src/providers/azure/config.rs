use crate::error::{Error, Result};

/// Marker left in sample configuration files in place of real credentials
const PLACEHOLDER_MARKER: &str = "<YOUR_";

/// Connection settings for an Azure OpenAI resource
#[derive(Debug, Clone)]
pub struct AzureConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub api_key: String,
    /// REST API version sent as the `api-version` query parameter
    pub api_version: String,
}

impl AzureConfig {
    pub const DEFAULT_API_VERSION: &'static str = "2024-02-01";

    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Reject missing values and unedited sample placeholders.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("azure".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(Error::config_error("Azure OpenAI endpoint is not set"));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::config_error("Azure OpenAI API version is empty"));
        }
        if self.endpoint.contains(PLACEHOLDER_MARKER) || self.api_key.contains(PLACEHOLDER_MARKER) {
            return Err(Error::config_error(
                "Azure OpenAI endpoint or API key still holds a placeholder value",
            ));
        }
        Ok(())
    }

    /// Chat-completions URL for one deployment
    pub fn completions_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, deployment, self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        let cfg = AzureConfig::new("https://res.openai.azure.com/", "key");
        assert_eq!(
            cfg.completions_url("gpt-4o"),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn test_custom_api_version() {
        let cfg = AzureConfig::new("https://res.openai.azure.com", "key")
            .with_api_version("2024-06-01");
        assert!(cfg.completions_url("o3-mini").ends_with("api-version=2024-06-01"));
    }

    #[test]
    fn test_placeholders_rejected() {
        let cfg = AzureConfig::new("<YOUR_AZURE_OPENAI_ENDPOINT>", "key");
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        let cfg = AzureConfig::new("https://res.openai.azure.com", "<YOUR_API_KEY>");
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_values_rejected() {
        assert!(matches!(
            AzureConfig::new("https://res.openai.azure.com", "").validate(),
            Err(Error::MissingApiKey(_))
        ));
        assert!(matches!(
            AzureConfig::new("  ", "key").validate(),
            Err(Error::Config(_))
        ));
        assert!(AzureConfig::new("https://res.openai.azure.com", "key")
            .validate()
            .is_ok());
    }
}
