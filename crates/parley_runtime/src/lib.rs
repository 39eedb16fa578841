//! parley_runtime: everything between an uploaded file, a prompt and a
//! streamed reply.
//!
//! - **context** turns uploads into a [`ContextPayload`] and composes the
//!   message list for one completion call
//! - **stream** folds provider fragments into display updates and a final reply
//! - **runtime** owns the session and runs one turn at a time
//!
//! [`ContextPayload`]: parley_core::ContextPayload

pub mod config;
pub mod context;
pub mod error;
pub mod runtime;
pub mod stream;

pub use config::{ModelCatalog, ProviderKind, RuntimeConfig};
pub use context::{
    compose, extract, ComposedRequest, ExtractionError, ImageNotice, BASELINE_PERSONA,
    TEXT_CONTEXT_PREFIX,
};
pub use error::{Result, RuntimeError};
pub use runtime::{Runtime, TurnOutcome};
pub use stream::{accumulate, DisplaySurface, StreamAccumulator, CURSOR};
