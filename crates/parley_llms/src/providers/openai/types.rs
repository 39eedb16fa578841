//! OpenAI chat-completions wire types

use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for bearer authentication
    pub api_key: String,
    /// Base URL (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Organization ID (optional)
    pub organization_id: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            organization_id: None,
        }
    }

    /// Set base URL. A trailing `/chat/completions` or `/` is stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        let url = url.trim_end_matches('/');
        let url = url.trim_end_matches("/chat/completions");
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Request message
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: OpenAIMessageContent,
}

/// Message content: a string or an array of content blocks
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum OpenAIMessageContent {
    String(String),
    Array(Vec<OpenAIContentBlock>),
}

/// Content block
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIContentBlock {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpenAIImageUrl {
    pub url: String,
}

/// Streaming chunk
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamEvent {
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<OpenAIStreamChoice>,
    pub usage: Option<OpenAIUsage>,
    pub error: Option<OpenAIError>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStreamChoice {
    #[serde(default)]
    pub delta: OpenAIStreamDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct OpenAIStreamDelta {
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Error object embedded in a stream chunk
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub message: String,
    /// A string such as "content_filter" or a bare HTTP status number
    pub code: Option<serde_json::Value>,
}

impl OpenAIError {
    /// `message`, prefixed with the error code when there is one
    pub fn describe(&self) -> String {
        match &self.code {
            Some(serde_json::Value::String(code)) => format!("[{}] {}", code, self.message),
            Some(serde_json::Value::Number(code)) => format!("[{}] {}", code, self.message),
            _ => self.message.clone(),
        }
    }
}
