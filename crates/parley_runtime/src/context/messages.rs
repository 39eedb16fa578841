//! Core turns to provider messages and request building.

use parley_core::{ContentPart, ConversationTurn, MessageContent, ModelSelection, Role};
use parley_llms::{GenerateOptions, GenerateRequest, Message};

use crate::config::RuntimeConfig;

fn to_llm_role(role: Role) -> parley_llms::Role {
    match role {
        Role::System => parley_llms::Role::System,
        Role::User => parley_llms::Role::User,
        Role::Assistant => parley_llms::Role::Assistant,
    }
}

fn to_llm_part(part: &ContentPart) -> parley_llms::ContentPart {
    match part {
        ContentPart::Text { text } => parley_llms::ContentPart::text(text.clone()),
        ContentPart::Image { url } => parley_llms::ContentPart::image(url.clone()),
    }
}

/// Convert a conversation turn to the provider message shape.
pub fn to_llm_message(turn: &ConversationTurn) -> Message {
    let content = match &turn.content {
        MessageContent::Text(text) => parley_llms::MessageContent::Text(text.clone()),
        MessageContent::Parts(parts) => {
            parley_llms::MessageContent::Parts(parts.iter().map(to_llm_part).collect())
        }
    };
    Message::new(to_llm_role(turn.role), content)
}

/// Build the provider request for `model` from composed turns.
pub fn build_generate_request(
    model: &ModelSelection,
    turns: &[ConversationTurn],
    config: &RuntimeConfig,
) -> GenerateRequest {
    let mut options = GenerateOptions::new();
    if let Some(temperature) = config.temperature {
        options = options.temperature(temperature);
    }
    if let Some(max_tokens) = config.max_tokens {
        options = options.max_tokens(max_tokens);
    }

    GenerateRequest::new(
        model.deployment_id.clone(),
        turns.iter().map(to_llm_message).collect(),
    )
    .with_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_turn_stays_text() {
        let msg = to_llm_message(&ConversationTurn::assistant("sure"));
        assert_eq!(msg.role, parley_llms::Role::Assistant);
        assert_eq!(msg.content, parley_llms::MessageContent::Text("sure".into()));
    }

    #[test]
    fn test_parts_turn_keeps_order() {
        let turn = ConversationTurn::user(MessageContent::Parts(vec![
            ContentPart::text("look"),
            ContentPart::image("data:image/png;base64,AA=="),
        ]));
        let msg = to_llm_message(&turn);
        assert_eq!(
            msg.content,
            parley_llms::MessageContent::Parts(vec![
                parley_llms::ContentPart::text("look"),
                parley_llms::ContentPart::image("data:image/png;base64,AA=="),
            ])
        );
    }

    #[test]
    fn test_request_uses_deployment_and_options() {
        let model = ModelSelection::new("GPT-3.5 Turbo", "gpt-35-turbo");
        let config = RuntimeConfig::new().with_temperature(0.3).with_max_tokens(64);
        let req = build_generate_request(&model, &[ConversationTurn::user("hi")], &config);

        assert_eq!(req.model, "gpt-35-turbo");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.options.temperature, Some(0.3));
        assert_eq!(req.options.max_tokens, Some(64));
    }

    #[test]
    fn test_request_without_options() {
        let model = ModelSelection::new("O3 Mini", "o3-mini");
        let req = build_generate_request(&model, &[], &RuntimeConfig::new());
        assert!(req.options.temperature.is_none());
        assert!(req.options.max_tokens.is_none());
    }
}
