//! File attachment handling for the chat front-end.
//!
//! Extraction results are memoized by filename: offering a file whose name
//! matches the last one offered is a no-op, any other file is extracted
//! and replaces the current context.

use std::path::Path;

use anyhow::{Context as _, Result};
use parley_core::{ContextPayload, UploadedArtifact};
use parley_runtime::{extract, ExtractionError, Runtime};
use tracing::{info, warn};

use crate::output;

/// Result of offering a file to the slot
#[derive(Debug)]
pub enum SlotUpdate {
    /// Same filename as the last offer; nothing was extracted
    Unchanged,
    Loaded(ContextPayload),
    Failed(ExtractionError),
}

/// Remembers which file the current context came from.
#[derive(Debug, Default)]
pub struct UploadSlot {
    filename: Option<String>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Extract `artifact` unless it has the same filename as the last offer.
    ///
    /// A failed extraction still records the filename, so offering the same
    /// file again does not retry.
    pub fn offer(&mut self, artifact: &UploadedArtifact) -> SlotUpdate {
        if self.filename.as_deref() == Some(artifact.filename.as_str()) {
            return SlotUpdate::Unchanged;
        }

        self.filename = Some(artifact.filename.clone());
        match extract(artifact) {
            Ok(payload) => SlotUpdate::Loaded(payload),
            Err(e) => SlotUpdate::Failed(e),
        }
    }

    pub fn clear(&mut self) {
        self.filename = None;
    }
}

/// Read `path`, show its details and load it as the runtime's context.
///
/// Extraction failures are reported and leave the session without
/// context; only an unreadable file is an error.
pub fn attach(runtime: &mut Runtime, slot: &mut UploadSlot, path: &Path) -> Result<()> {
    let artifact = UploadedArtifact::from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    output::data("file", &artifact.details());

    match slot.offer(&artifact) {
        SlotUpdate::Unchanged => {
            output::dim(&format!("{} is already loaded.", artifact.filename));
        }
        SlotUpdate::Loaded(payload) => {
            let kind = payload.kind();
            runtime.set_context(payload);
            info!(filename = %artifact.filename, %kind, "context loaded");
            output::success(&format!("Context from {} file loaded.", kind));
        }
        SlotUpdate::Failed(e) => {
            runtime.clear_context();
            warn!(filename = %artifact.filename, error = %e, "context extraction failed");
            output::warning(&format!("{}. Continuing without file context.", e));
        }
    }

    Ok(())
}

/// Drop the current context and forget the memoized filename.
pub fn detach(runtime: &mut Runtime, slot: &mut UploadSlot) -> bool {
    slot.clear();
    runtime.clear_context().is_some()
}
