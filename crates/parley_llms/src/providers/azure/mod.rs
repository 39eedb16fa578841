//! Azure OpenAI provider module
//!
//! Azure hosts the OpenAI chat-completions protocol per deployment, so the
//! request body and SSE handling are shared with [`crate::providers::openai`].

mod config;
mod provider;

pub use config::AzureConfig;
pub use provider::AzureOpenAIProvider;
