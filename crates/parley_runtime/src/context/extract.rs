//! Uploaded file to context payload.
//!
//! Dispatch is on the declared media type only; the bytes are never
//! sniffed. No caching happens here.

use std::panic::{self, UnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use parley_core::{ContextPayload, UploadedArtifact};
use thiserror::Error;
use tracing::{debug, info_span};

/// Why an upload produced no context. None of these end the session.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("'{filename}' is not valid UTF-8 text: {source}")]
    Decoding {
        filename: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("could not read PDF '{filename}': {message}")]
    DocumentParse { filename: String, message: String },

    #[error("unsupported file '{filename}' ({media_type})")]
    UnsupportedFormat {
        filename: String,
        media_type: String,
    },

    #[error("no text found in '{0}'")]
    EmptyContent(String),
}

/// Coarse classification of a declared media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    PlainText,
    Pdf,
    Image,
    Other,
}

fn classify(media_type: &str) -> MediaKind {
    // Drop parameters such as "; charset=utf-8"
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "text/plain" => MediaKind::PlainText,
        "application/pdf" => MediaKind::Pdf,
        e if e.starts_with("image/") => MediaKind::Image,
        _ => MediaKind::Other,
    }
}

/// Convert one uploaded artifact into a context payload.
pub fn extract(artifact: &UploadedArtifact) -> Result<ContextPayload, ExtractionError> {
    let kind = classify(&artifact.media_type);
    let span = info_span!(
        "extract",
        filename = %artifact.filename,
        media_type = %artifact.media_type,
        size = artifact.size(),
    );
    let _guard = span.enter();
    debug!(?kind, "extracting context");

    match kind {
        MediaKind::PlainText => extract_text(artifact),
        MediaKind::Pdf => extract_pdf(artifact),
        MediaKind::Image => extract_image(artifact),
        MediaKind::Other => Err(unsupported(artifact)),
    }
}

fn unsupported(artifact: &UploadedArtifact) -> ExtractionError {
    ExtractionError::UnsupportedFormat {
        filename: artifact.filename.clone(),
        media_type: artifact.media_type.clone(),
    }
}

fn extract_text(artifact: &UploadedArtifact) -> Result<ContextPayload, ExtractionError> {
    let text = std::str::from_utf8(&artifact.bytes).map_err(|source| ExtractionError::Decoding {
        filename: artifact.filename.clone(),
        source,
    })?;

    ContextPayload::text(text)
        .ok_or_else(|| ExtractionError::EmptyContent(artifact.filename.clone()))
}

fn extract_pdf(artifact: &UploadedArtifact) -> Result<ContextPayload, ExtractionError> {
    let parse_error = |message: String| ExtractionError::DocumentParse {
        filename: artifact.filename.clone(),
        message,
    };

    // pdf-extract panics on some malformed documents instead of erroring.
    let pages = catch_unwind_quietly(|| {
        pdf_extract::extract_text_from_mem_by_pages(&artifact.bytes)
    })
    .map_err(|_| parse_error("parser aborted on malformed document".to_string()))?
    .map_err(|e| parse_error(e.to_string()))?;

    debug!(pages = pages.len(), "pdf parsed");

    let text = join_pages(pages);
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyContent(artifact.filename.clone()));
    }

    ContextPayload::text(text)
        .ok_or_else(|| ExtractionError::EmptyContent(artifact.filename.clone()))
}

/// Serializes swaps of the process-wide panic hook.
static PANIC_HOOK_LOCK: Mutex<()> = Mutex::new(());

/// `catch_unwind` without the default hook writing the panic to stderr.
///
/// Only panics raised on this thread while `f` runs are silenced; panics
/// elsewhere still reach the previous hook.
fn catch_unwind_quietly<T>(f: impl FnOnce() -> T + UnwindSafe) -> thread::Result<T> {
    let _lock = PANIC_HOOK_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let previous = Arc::new(panic::take_hook());
    let forward = Arc::clone(&previous);
    let quiet_thread = thread::current().id();
    panic::set_hook(Box::new(move |info| {
        if thread::current().id() == quiet_thread {
            debug!(panic = %info, "pdf parser panicked");
        } else {
            forward(info);
        }
    }));

    let result = panic::catch_unwind(f);

    // Dropping our hook releases `forward`.
    drop(panic::take_hook());
    panic::set_hook(Box::new(move |info| previous(info)));
    result
}

/// Page texts concatenated in page order.
fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

fn extract_image(artifact: &UploadedArtifact) -> Result<ContextPayload, ExtractionError> {
    // Raw bytes pass through untouched; no decode or re-encode.
    ContextPayload::image(STANDARD.encode(&artifact.bytes), artifact.media_type.clone())
        .ok_or_else(|| unsupported(artifact))
}
