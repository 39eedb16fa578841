//! Conversation runtime for parley.
//!
//! Owns the session, the active model and the provider, and runs one turn
//! at a time. `send` takes `&mut self`, so a session never has two requests
//! in flight.

use std::sync::Arc;
use std::time::Instant;

use parley_core::{ContextPayload, ConversationSession, ConversationTurn, ModelSelection};
use parley_llms::{AzureOpenAIProvider, OpenAIProvider, Provider};
use parley_observability::{chat_turn_span, provider_request_span, record_duration, record_error};
use tracing::{info, Instrument};

use crate::config::{ModelCatalog, ProviderKind, RuntimeConfig};
use crate::context::{build_generate_request, compose, ImageNotice};
use crate::error::{Result, RuntimeError};
use crate::stream::{accumulate, DisplaySurface};

/// Result of one successful turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Full assistant reply, as committed to history
    pub reply: String,
    /// Set when an image context was attached to, or withheld from, this turn
    pub image_notice: Option<ImageNotice>,
    /// Display name of the model that answered
    pub model: String,
}

pub struct Runtime {
    session: ConversationSession,
    provider: Arc<dyn Provider>,
    model: ModelSelection,
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a runtime around an existing provider.
    pub fn new(config: RuntimeConfig, provider: Arc<dyn Provider>) -> Result<Self> {
        let model = config.initial_model()?;
        info!(
            provider = provider.provider_id(),
            model = %model.display_name,
            "runtime ready"
        );

        Ok(Self {
            session: ConversationSession::new(),
            provider,
            model,
            config,
        })
    }

    /// Create a runtime, building the provider named by the config from
    /// its environment variables.
    pub fn from_config(config: RuntimeConfig) -> Result<Self> {
        let provider = Self::create_provider(config.provider)?;
        Self::new(config, provider)
    }

    fn create_provider(kind: ProviderKind) -> Result<Arc<dyn Provider>> {
        let provider: Arc<dyn Provider> = match kind {
            ProviderKind::Azure => Arc::new(
                AzureOpenAIProvider::from_env()
                    .map_err(|e| RuntimeError::LlmFailed(format!("Azure OpenAI: {}", e)))?,
            ),
            ProviderKind::OpenAI => Arc::new(
                OpenAIProvider::from_env()
                    .map_err(|e| RuntimeError::LlmFailed(format!("OpenAI: {}", e)))?,
            ),
        };
        Ok(provider)
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn model(&self) -> &ModelSelection {
        &self.model
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.config.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    /// What the next `send` will report about the image context, if any.
    pub fn image_notice(&self) -> Option<ImageNotice> {
        match self.session.context() {
            Some(ContextPayload::Image { .. }) if self.model.supports_image_input => {
                Some(ImageNotice::Attached)
            }
            Some(ContextPayload::Image { .. }) => Some(ImageNotice::Unsupported),
            _ => None,
        }
    }

    /// Switch the active model by display name or deployment ID. History
    /// and context are kept.
    pub fn select_model(&mut self, name: &str) -> Result<&ModelSelection> {
        self.model = self.config.catalog.find(name)?.clone();
        info!(model = %self.model.display_name, "model selected");
        Ok(&self.model)
    }

    /// Replace the current context; returns the one it displaced.
    pub fn set_context(&mut self, payload: ContextPayload) -> Option<ContextPayload> {
        info!(kind = %payload.kind(), size = payload.len(), "context set");
        self.session.set_context(payload)
    }

    pub fn clear_context(&mut self) -> Option<ContextPayload> {
        self.session.clear_context()
    }

    /// Drop all turns and the context.
    pub fn reset(&mut self) {
        self.session.reset();
        info!(session = %self.session.id, "conversation reset");
    }

    /// Run one turn: compose, stream the reply into `surface`, then commit
    /// the user turn and the assistant turn together.
    ///
    /// On any failure nothing is committed and history is exactly as it
    /// was before the call.
    pub async fn send(
        &mut self,
        prompt: &str,
        surface: &mut dyn DisplaySurface,
    ) -> Result<TurnOutcome> {
        if prompt.trim().is_empty() {
            return Err(RuntimeError::EmptyPrompt);
        }

        let span = chat_turn_span!(
            self.model.display_name.as_str(),
            self.session.turn_count() / 2 + 1
        );
        if let Some(context) = self.session.context() {
            span.record("context.kind", context.kind().as_str());
        }

        self.send_turn(prompt, surface).instrument(span).await
    }

    async fn send_turn(
        &mut self,
        prompt: &str,
        surface: &mut dyn DisplaySurface,
    ) -> Result<TurnOutcome> {
        let start = Instant::now();

        let composed = compose(
            prompt,
            self.session.context(),
            self.session.turns(),
            self.model.supports_image_input,
        );
        let request = build_generate_request(&self.model, &composed.messages, &self.config);

        let reply = self
            .stream_reply(request, surface)
            .instrument(provider_request_span!(
                self.provider.provider_id(),
                self.model.deployment_id.as_str()
            ))
            .await;

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                record_error(&e);
                return Err(e);
            }
        };

        self.session.add_turn(composed.user_turn);
        self.session.add_turn(ConversationTurn::assistant(reply.clone()));

        let span = tracing::Span::current();
        span.record("reply.chars", reply.chars().count());
        record_duration("duration_ms", start.elapsed());
        info!(turns = self.session.turn_count(), "turn committed");

        Ok(TurnOutcome {
            reply,
            image_notice: composed.image_notice,
            model: self.model.display_name.clone(),
        })
    }

    async fn stream_reply(
        &self,
        request: parley_llms::GenerateRequest,
        surface: &mut dyn DisplaySurface,
    ) -> Result<String> {
        let start = Instant::now();

        let stream = self
            .provider
            .stream(request)
            .await
            .map_err(|e| RuntimeError::StreamingTransport(e.to_string()))?;

        let reply = accumulate(stream, surface).await;
        record_duration("duration_ms", start.elapsed());
        reply
    }
}
