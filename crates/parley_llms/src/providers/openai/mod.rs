//! OpenAI chat-completions provider module
//!
//! The wire conversion and SSE stream handling here are shared with the
//! Azure OpenAI provider, which speaks the same protocol on a different URL.

pub(crate) mod convert;
mod provider;
pub(crate) mod stream;
pub(crate) mod types;

pub use provider::OpenAIProvider;
pub use types::OpenAIConfig;
