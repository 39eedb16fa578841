//! Command dispatch.

pub mod ask;
pub mod chat;
pub mod extract;
pub mod models;

use anyhow::{Context as _, Result};
use parley_runtime::{ImageNotice, ProviderKind, Runtime, RuntimeConfig};

use crate::cli::{Cli, Command};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chat { model, file } => chat::handle(model, file).await,
        Command::Ask {
            prompt,
            file,
            model,
        } => ask::handle(&prompt, file, model).await,
        Command::Models => models::handle(),
        Command::Extract { path } => extract::handle(&path),
    }
}

/// Build a runtime from the environment, optionally overriding the model.
pub(crate) fn build_runtime(model: Option<String>) -> Result<Runtime> {
    let mut config = RuntimeConfig::from_env().context("Invalid parley configuration")?;
    if let Some(model) = model {
        config = config.with_model(model);
    }

    let provider = config.provider;
    Runtime::from_config(config).with_context(|| match provider {
        ProviderKind::Azure => {
            "Could not set up Azure OpenAI. Set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY."
        }
        ProviderKind::OpenAI => {
            "Could not set up OpenAI. Set OPENAI_API_KEY (and OPENAI_BASE_URL if needed)."
        }
    })
}

/// Tell the user what happens to an attached image on this turn.
pub(crate) fn print_image_notice(notice: Option<ImageNotice>, model: &str) {
    match notice {
        Some(ImageNotice::Attached) => output::info(&format!("Image data sent to {}.", model)),
        Some(ImageNotice::Unsupported) => output::warning(&format!(
            "The selected model ({}) might not support image analysis. Sending only the text prompt.",
            model
        )),
        None => {}
    }
}

pub(crate) fn notice_label(notice: Option<ImageNotice>) -> Option<&'static str> {
    notice.map(|n| match n {
        ImageNotice::Attached => "attached",
        ImageNotice::Unsupported => "unsupported",
    })
}
