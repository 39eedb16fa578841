use parley_core::ConversationTurn;

/// Leading system prompt for every request
pub const BASELINE_PERSONA: &str = "You are a helpful assistant with a bit of witty style.";

/// Introduces uploaded text in its own system turn
pub const TEXT_CONTEXT_PREFIX: &str = "Also consider the following text context:\n";

/// System turn carrying extracted document text.
pub fn text_context_turn(content: &str) -> ConversationTurn {
    ConversationTurn::system(format!("{}{}", TEXT_CONTEXT_PREFIX, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::Role;

    #[test]
    fn test_text_context_turn() {
        let turn = text_context_turn("Lorem ipsum");
        assert_eq!(turn.role, Role::System);
        assert_eq!(
            turn.text(),
            "Also consider the following text context:\nLorem ipsum"
        );
    }
}
