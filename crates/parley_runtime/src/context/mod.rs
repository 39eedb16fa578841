//! Context ingestion and request building.
//!
//! - **extract**: uploaded file to [`ContextPayload`](parley_core::ContextPayload)
//! - **compose**: prompt, context and history to the message list for one call
//! - **prompt**: fixed system prompt text
//! - **messages**: core turns to provider messages

mod compose;
mod extract;
mod messages;
mod prompt;

pub use compose::{compose, ComposedRequest, ImageNotice};
pub use extract::{extract, ExtractionError};
pub use messages::{build_generate_request, to_llm_message};
pub use prompt::{text_context_turn, BASELINE_PERSONA, TEXT_CONTEXT_PREFIX};
