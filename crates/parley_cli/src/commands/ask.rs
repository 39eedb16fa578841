//! `parley ask`: one prompt, one streamed reply.

use std::path::PathBuf;

use anyhow::Result;

use super::{build_runtime, notice_label, print_image_notice};
use crate::attachments::{attach, UploadSlot};
use crate::output;
use crate::surface::TerminalSurface;

pub async fn handle(prompt: &str, file: Option<PathBuf>, model: Option<String>) -> Result<()> {
    let mut runtime = build_runtime(model)?;

    if let Some(path) = file {
        attach(&mut runtime, &mut UploadSlot::new(), &path)?;
    }

    print_image_notice(runtime.image_notice(), &runtime.model().display_name);

    let mut surface = TerminalSurface::new();
    let outcome = runtime.send(prompt, &mut surface).await?;

    if output::is_json() {
        output::data(
            "reply",
            &serde_json::json!({
                "model": outcome.model,
                "reply": outcome.reply,
                "image": notice_label(outcome.image_notice),
            }),
        );
    }

    Ok(())
}
