//! Conversion between unified types and OpenAI chat-completions types

use super::types::{
    OpenAIContentBlock, OpenAIImageUrl, OpenAIMessage, OpenAIMessageContent, OpenAIRequest,
};
use crate::types::{ContentPart, GenerateRequest, Message, MessageContent};

/// Convert unified request to OpenAI request
pub fn to_openai_request(req: &GenerateRequest, stream: bool) -> OpenAIRequest {
    OpenAIRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(to_openai_message).collect(),
        temperature: req.options.temperature,
        max_tokens: req.options.max_tokens,
        stream: if stream { Some(true) } else { None },
    }
}

/// Convert unified message to OpenAI message.
///
/// Plain text stays a JSON string; a parts list becomes a content-block
/// array with images as `image_url` blocks.
fn to_openai_message(msg: &Message) -> OpenAIMessage {
    let content = match &msg.content {
        MessageContent::Text(text) => OpenAIMessageContent::String(text.clone()),
        MessageContent::Parts(parts) => {
            OpenAIMessageContent::Array(parts.iter().map(to_content_block).collect())
        }
    };

    OpenAIMessage {
        role: msg.role.as_str().to_string(),
        content,
    }
}

fn to_content_block(part: &ContentPart) -> OpenAIContentBlock {
    match part {
        ContentPart::Text { text } => OpenAIContentBlock::Text { text: text.clone() },
        ContentPart::Image { url } => OpenAIContentBlock::ImageUrl {
            image_url: OpenAIImageUrl { url: url.clone() },
        },
    }
}
