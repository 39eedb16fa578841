//! parley_llms: streaming chat-completion client.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               ProviderRegistry               │
//! │      HashMap<String, Arc<dyn Provider>>      │
//! │                      │                       │
//! │          ┌───────────┴───────────┐           │
//! │          ▼                       ▼           │
//! │   ┌─────────────┐         ┌─────────────┐    │
//! │   │ Azure OpenAI│         │   OpenAI    │    │
//! │   │  Provider   │         │  Provider   │    │
//! │   └──────┬──────┘         └──────┬──────┘    │
//! │          └──── chat/completions ─┘           │
//! │                 (SSE stream)                 │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use parley_llms::{AzureOpenAIProvider, ProviderRegistry};
//!
//! let provider = AzureOpenAIProvider::from_env().unwrap();
//! let registry = ProviderRegistry::new().register(provider);
//! let azure = registry.get_provider("azure").unwrap();
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;


pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

pub use providers::azure::AzureConfig;
pub use providers::openai::OpenAIConfig;
pub use providers::{AzureOpenAIProvider, OpenAIProvider};

pub use types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest, GenerateStream,
    Headers, Message, MessageContent, Role, StreamEvent, Usage,
};
