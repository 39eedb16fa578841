use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateStream, Headers};

/// A hosted chat-completion endpoint that can stream a reply.
///
/// The returned stream is finite and cannot be restarted; it ends either
/// after the last fragment or with an `Err` item.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"azure"`.
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with `custom_headers`.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Submit `request` and return its fragment stream.
    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream>;
}
