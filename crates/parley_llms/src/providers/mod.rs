pub mod azure;
pub mod openai;

pub use azure::AzureOpenAIProvider;
pub use openai::OpenAIProvider;
