//! Message list assembly for one completion call.

use parley_core::{ContentPart, ContextPayload, ConversationTurn, MessageContent};

use super::prompt::{text_context_turn, BASELINE_PERSONA};

/// What happened to an image context on this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageNotice {
    /// The image was attached to the user turn
    Attached,
    /// The model takes no image input; only the text prompt was sent
    Unsupported,
}

/// Output of [`compose`]
#[derive(Debug, Clone)]
pub struct ComposedRequest {
    /// Full ordered message list, ending with `user_turn`
    pub messages: Vec<ConversationTurn>,
    /// The new user turn, to be committed to history on success
    pub user_turn: ConversationTurn,
    pub image_notice: Option<ImageNotice>,
}

/// Build the ordered message list for one completion call.
///
/// History is trusted as-is. Text context is re-sent as a system turn on
/// every call while it stays set.
pub fn compose(
    prompt: &str,
    context: Option<&ContextPayload>,
    history: &[ConversationTurn],
    supports_image: bool,
) -> ComposedRequest {
    let mut messages = Vec::with_capacity(history.len() + 3);
    messages.push(ConversationTurn::system(BASELINE_PERSONA));

    if let Some(ContextPayload::Text { content }) = context {
        messages.push(text_context_turn(content));
    }

    messages.extend(history.iter().cloned());

    let mut parts = vec![ContentPart::text(prompt)];
    let image_notice = match context {
        Some(image @ ContextPayload::Image { .. }) if supports_image => {
            parts.extend(image.data_url().map(ContentPart::image));
            Some(ImageNotice::Attached)
        }
        Some(ContextPayload::Image { .. }) => Some(ImageNotice::Unsupported),
        _ => None,
    };

    let user_turn = ConversationTurn::user(MessageContent::from_parts(parts));
    messages.push(user_turn.clone());

    ComposedRequest {
        messages,
        user_turn,
        image_notice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TEXT_CONTEXT_PREFIX;
    use parley_core::Role;

    fn image() -> ContextPayload {
        ContextPayload::image("iVBORw0KGgo=", "image/png").unwrap()
    }

    fn roles(turns: &[ConversationTurn]) -> Vec<Role> {
        turns.iter().map(|t| t.role).collect()
    }

    #[test]
    fn test_hello_without_context() {
        let composed = compose("Hello", None, &[], false);

        assert_eq!(roles(&composed.messages), vec![Role::System, Role::User]);
        assert_eq!(composed.messages[0].text(), BASELINE_PERSONA);
        assert_eq!(composed.messages[1].content, MessageContent::Text("Hello".into()));
        assert_eq!(composed.image_notice, None);
    }

    #[test]
    fn test_summarize_with_text_context() {
        let context = ContextPayload::text("Lorem ipsum").unwrap();
        let composed = compose("Summarize", Some(&context), &[], false);

        assert_eq!(
            roles(&composed.messages),
            vec![Role::System, Role::System, Role::User]
        );
        assert_eq!(
            composed.messages[1].text(),
            format!("{}Lorem ipsum", TEXT_CONTEXT_PREFIX)
        );
        assert_eq!(composed.messages[2].text(), "Summarize");
        assert!(!composed.messages[2].content.is_multi_part());
    }

    #[test]
    fn test_baseline_first_for_any_input() {
        let history = vec![
            ConversationTurn::user("earlier"),
            ConversationTurn::assistant("reply"),
        ];
        let contexts = [None, Some(ContextPayload::text("doc").unwrap()), Some(image())];

        for context in contexts.iter() {
            for supports_image in [true, false] {
                let composed = compose("", context.as_ref(), &history, supports_image);
                assert_eq!(composed.messages[0].role, Role::System);
                assert_eq!(composed.messages[0].text(), BASELINE_PERSONA);
            }
        }
    }

    #[test]
    fn test_text_context_resent_every_call() {
        let context = ContextPayload::text("Lorem ipsum").unwrap();
        let first = compose("one", Some(&context), &[], false);

        let mut history = vec![first.user_turn.clone(), ConversationTurn::assistant("ok")];
        let second = compose("two", Some(&context), &history, false);
        history.push(second.user_turn.clone());

        for composed in [&first, &second] {
            let context_turns = composed
                .messages
                .iter()
                .filter(|t| t.role == Role::System && t.text().contains("Lorem ipsum"))
                .count();
            assert_eq!(context_turns, 1);
        }
        // Context turn sits before history, not inside it
        assert_eq!(second.messages[1].text(), format!("{}Lorem ipsum", TEXT_CONTEXT_PREFIX));
        assert_eq!(second.messages[2].text(), "one");
    }

    #[test]
    fn test_history_appended_unchanged() {
        let history = vec![
            ConversationTurn::user("q1"),
            ConversationTurn::assistant("a1"),
            ConversationTurn::user("q2"),
            ConversationTurn::assistant("a2"),
        ];
        let composed = compose("q3", None, &history, false);

        assert_eq!(composed.messages.len(), history.len() + 2);
        for (sent, original) in composed.messages[1..=4].iter().zip(&history) {
            assert_eq!(sent.role, original.role);
            assert_eq!(sent.content, original.content);
            assert_eq!(sent.timestamp, original.timestamp);
        }
    }

    #[test]
    fn test_image_attached_when_supported() {
        let composed = compose("what is this?", Some(&image()), &[], true);
        let user = composed.messages.last().unwrap();

        assert_eq!(composed.image_notice, Some(ImageNotice::Attached));
        assert_eq!(
            user.content,
            MessageContent::Parts(vec![
                ContentPart::text("what is this?"),
                ContentPart::image("data:image/png;base64,iVBORw0KGgo="),
            ])
        );
        assert_eq!(user.content.image_count(), 1);
        // Image context never adds a system turn
        assert_eq!(composed.messages.len(), 2);
    }

    #[test]
    fn test_image_dropped_when_unsupported() {
        let composed = compose("what is this?", Some(&image()), &[], false);
        let user = composed.messages.last().unwrap();

        assert_eq!(composed.image_notice, Some(ImageNotice::Unsupported));
        assert_eq!(user.content.image_count(), 0);
        assert!(!user.content.is_multi_part());
        assert_eq!(user.text(), "what is this?");
    }

    #[test]
    fn test_user_turn_matches_last_message() {
        let composed = compose("hi", Some(&image()), &[], true);
        let last = composed.messages.last().unwrap();
        assert_eq!(last.content, composed.user_turn.content);
        assert_eq!(last.role, Role::User);
    }
}
