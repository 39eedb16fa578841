//! Normalized context derived from an uploaded file.

use serde::{Deserialize, Serialize};

/// Extracted file content attached to subsequent requests.
///
/// The text or base64 body of either variant is never empty; the
/// constructors refuse empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextPayload {
    Text {
        content: String,
    },
    Image {
        base64_data: String,
        mime_type: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Text,
    Image,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Text => "text",
            ContextKind::Image => "image",
        }
    }
}

impl std::fmt::Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContextPayload {
    pub fn text(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }
        Some(ContextPayload::Text { content })
    }

    pub fn image(base64_data: impl Into<String>, mime_type: impl Into<String>) -> Option<Self> {
        let base64_data = base64_data.into();
        if base64_data.is_empty() {
            return None;
        }
        Some(ContextPayload::Image {
            base64_data,
            mime_type: mime_type.into(),
        })
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            ContextPayload::Text { .. } => ContextKind::Text,
            ContextPayload::Image { .. } => ContextKind::Image,
        }
    }

    /// `data:` URL for an image payload.
    pub fn data_url(&self) -> Option<String> {
        match self {
            ContextPayload::Image {
                base64_data,
                mime_type,
            } => Some(format!("data:{};base64,{}", mime_type, base64_data)),
            ContextPayload::Text { .. } => None,
        }
    }

    /// Size of the carried body in bytes (text length or base64 length).
    pub fn len(&self) -> usize {
        match self {
            ContextPayload::Text { content } => content.len(),
            ContextPayload::Image { base64_data, .. } => base64_data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
