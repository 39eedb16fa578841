use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    Image { url: String },
}

impl ContentPart {
    pub fn text(content: impl Into<String>) -> Self {
        ContentPart::Text {
            text: content.into(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::Image { url: url.into() }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentPart::Image { .. })
    }
}

/// Body of a turn. `Parts` is reserved for turns that carry image data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Build content from a parts list, collapsing to plain text when no
    /// part carries an image.
    pub fn from_parts(parts: Vec<ContentPart>) -> Self {
        if parts.iter().any(ContentPart::is_image) {
            return MessageContent::Parts(parts);
        }

        let text = parts
            .into_iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text),
                ContentPart::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        MessageContent::Text(text)
    }

    /// Concatenated text of the content, ignoring image parts.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Image { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn parts(&self) -> Vec<ContentPart> {
        match self {
            MessageContent::Text(text) => vec![ContentPart::text(text.clone())],
            MessageContent::Parts(parts) => parts.clone(),
        }
    }

    pub fn image_count(&self) -> usize {
        match self {
            MessageContent::Text(_) => 0,
            MessageContent::Parts(parts) => parts.iter().filter(|p| p.is_image()).count(),
        }
    }

    pub fn is_multi_part(&self) -> bool {
        matches!(self, MessageContent::Parts(_))
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn has_image(&self) -> bool {
        self.content.image_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let decoded: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Role::Assistant);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_content_part_tags() {
        let json = serde_json::to_string(&ContentPart::image("data:image/png;base64,AA==")).unwrap();
        assert!(json.contains(r#""type":"image""#));

        let json = serde_json::to_string(&ContentPart::text("hi")).unwrap();
        assert_eq!(json, r#"{"type":"text","text":"hi"}"#);
    }

    #[test]
    fn test_from_parts_collapses_text_only() {
        let content = MessageContent::from_parts(vec![ContentPart::text("Hello")]);
        assert_eq!(content, MessageContent::Text("Hello".to_string()));
        assert!(!content.is_multi_part());
    }

    #[test]
    fn test_from_parts_keeps_images() {
        let content = MessageContent::from_parts(vec![
            ContentPart::text("What is this?"),
            ContentPart::image("data:image/png;base64,AA=="),
        ]);
        assert!(content.is_multi_part());
        assert_eq!(content.image_count(), 1);
        assert_eq!(content.text(), "What is this?");
    }

    #[test]
    fn test_untagged_content_serialization() {
        let text = MessageContent::from("plain");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"plain\"");

        let parts = MessageContent::Parts(vec![ContentPart::text("a")]);
        let json = serde_json::to_string(&parts).unwrap();
        assert!(json.starts_with('['));
        let decoded: MessageContent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, parts);
    }

    #[test]
    fn test_turn_factory_methods() {
        assert_eq!(ConversationTurn::system("s").role, Role::System);
        assert_eq!(ConversationTurn::user("u").role, Role::User);
        assert_eq!(ConversationTurn::assistant("a").role, Role::Assistant);
    }

    #[test]
    fn test_turn_has_image() {
        let plain = ConversationTurn::user("no image");
        assert!(!plain.has_image());

        let with_image = ConversationTurn::user(MessageContent::from_parts(vec![
            ContentPart::text("look"),
            ContentPart::image("data:image/jpeg;base64,/9j/"),
        ]));
        assert!(with_image.has_image());
        assert_eq!(with_image.text(), "look");
    }
}
