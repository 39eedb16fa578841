//! `parley extract`: run the context extractor on one file.

use std::path::Path;

use anyhow::{Context as _, Result};
use parley_core::{ContextPayload, UploadedArtifact};
use parley_runtime::extract;

use crate::output;

const PREVIEW_CHARS: usize = 400;

pub fn handle(path: &Path) -> Result<()> {
    let artifact = UploadedArtifact::from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let spinner = output::spinner("Extracting...");
    let result = extract(&artifact);
    spinner.finish_and_clear();

    let payload = result.with_context(|| format!("No context from {}", artifact.filename))?;

    if output::is_json() {
        output::data(
            "context",
            &serde_json::json!({
                "file": artifact.details(),
                "kind": payload.kind().as_str(),
                "length": payload.len(),
                "preview": preview(&payload),
            }),
        );
        return Ok(());
    }

    output::header(&artifact.filename);
    output::kv("type", &artifact.media_type);
    output::kv("size", &format!("{} bytes", artifact.size()));
    output::kv("context", payload.kind().as_str());
    output::kv("length", &payload.len().to_string());
    output::dim(&preview(&payload));
    Ok(())
}

/// Leading text for text context; a short description for images.
fn preview(payload: &ContextPayload) -> String {
    match payload {
        ContextPayload::Text { content } => {
            let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
            if content.chars().count() > PREVIEW_CHARS {
                preview.push_str("...");
            }
            preview
        }
        ContextPayload::Image {
            base64_data,
            mime_type,
        } => format!("{} image, {} base64 characters", mime_type, base64_data.len()),
    }
}
