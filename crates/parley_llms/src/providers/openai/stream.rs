//! Chat-completions SSE streaming support

use super::types::{OpenAIStreamChoice, OpenAIStreamEvent};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateStream, StreamEvent, Usage};
use futures::stream::StreamExt;
use reqwest_eventsource::{Event, EventSource};

/// Running state across the chunks of one stream
#[derive(Debug, Default)]
pub(crate) struct StreamState {
    started: bool,
    usage: Usage,
    finish_reason: Option<FinishReason>,
}

impl StreamState {
    fn finish_event(&mut self) -> StreamEvent {
        StreamEvent::finish(
            std::mem::take(&mut self.usage),
            self.finish_reason.take().unwrap_or_else(FinishReason::other),
        )
    }
}

/// Create a stream from a chat-completions EventSource.
///
/// `label` names the API in error messages (e.g. "Azure OpenAI").
pub fn create_stream(mut event_source: EventSource, label: &'static str) -> GenerateStream {
    let stream = async_stream::stream! {
        let mut state = StreamState::default();

        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => {
                    continue;
                }
                Ok(Event::Message(message)) => {
                    if message.data.trim() == "[DONE]" {
                        break;
                    }

                    let parsed = serde_json::from_str::<OpenAIStreamEvent>(&message.data)
                        .map_err(|e| Error::stream_error(format!("Failed to parse event: {}", e)))
                        .and_then(|chunk| process_chunk(chunk, &mut state, label));

                    match parsed {
                        Ok(events) => {
                            for stream_event in events {
                                yield Ok(stream_event);
                            }
                        }
                        Err(e) => {
                            yield Err(e);
                            event_source.close();
                            return;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(format!(
                        "{} API error {}: {}",
                        label, status, error_body
                    )));
                    event_source.close();
                    return;
                }
                Err(e) => {
                    yield Err(Error::stream_error(format!("Stream error: {}", e)));
                    event_source.close();
                    return;
                }
            }
        }

        event_source.close();
        yield Ok(state.finish_event());
    };

    GenerateStream::new(Box::pin(stream))
}

/// Turn one parsed chunk into unified events.
pub(crate) fn process_chunk(
    chunk: OpenAIStreamEvent,
    state: &mut StreamState,
    label: &str,
) -> Result<Vec<StreamEvent>> {
    if let Some(error) = chunk.error {
        return Err(Error::provider_error(format!(
            "{} API error: {}",
            label,
            error.describe()
        )));
    }

    let mut events = Vec::new();

    if !state.started {
        if let Some(id) = chunk.id.as_ref().filter(|id| !id.is_empty()) {
            state.started = true;
            events.push(StreamEvent::start(id.clone()));
        }
    }

    if let Some(usage) = chunk.usage {
        state.usage = Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        };
    }

    // Azure sends a leading chunk with only content-filter results and no choices.
    for choice in chunk.choices {
        events.extend(process_choice(choice, state));
    }

    Ok(events)
}

fn process_choice(choice: OpenAIStreamChoice, state: &mut StreamState) -> Option<StreamEvent> {
    if let Some(reason) = choice.finish_reason {
        state.finish_reason = Some(FinishReason::parse(&reason));
    }

    choice
        .delta
        .content
        .filter(|content| !content.is_empty())
        .map(|content| StreamEvent::text_delta("", content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FinishReasonKind;

    fn parse(json: &str) -> OpenAIStreamEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_process_text_delta() {
        let mut state = StreamState::default();
        let chunk = parse(
            r#"{"id":"chatcmpl-1","choices":[{"index":0,"delta":{"content":"Hel"},"finish_reason":null}]}"#,
        );

        let events = process_chunk(chunk, &mut state, "OpenAI").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], StreamEvent::start("chatcmpl-1"));
        assert_eq!(events[1], StreamEvent::text_delta("", "Hel"));
    }

    #[test]
    fn test_start_emitted_once() {
        let mut state = StreamState::default();
        let first = parse(r#"{"id":"c","choices":[{"delta":{"content":"a"}}]}"#);
        let second = parse(r#"{"id":"c","choices":[{"delta":{"content":"b"}}]}"#);

        process_chunk(first, &mut state, "OpenAI").unwrap();
        let events = process_chunk(second, &mut state, "OpenAI").unwrap();
        assert_eq!(events, vec![StreamEvent::text_delta("", "b")]);
    }

    #[test]
    fn test_empty_and_missing_content_skipped() {
        let mut state = StreamState::default();
        let chunk = parse(
            r#"{"id":"","choices":[{"delta":{"role":"assistant","content":""}},{"delta":{}}]}"#,
        );
        assert!(process_chunk(chunk, &mut state, "OpenAI").unwrap().is_empty());
    }

    #[test]
    fn test_filter_only_chunk_yields_nothing() {
        let mut state = StreamState::default();
        let chunk = parse(r#"{"id":"","choices":[],"prompt_filter_results":[{"prompt_index":0}]}"#);
        assert!(process_chunk(chunk, &mut state, "Azure OpenAI").unwrap().is_empty());
    }

    #[test]
    fn test_finish_reason_and_usage_carried_to_finish() {
        let mut state = StreamState::default();
        let chunk = parse(
            r#"{"id":"c","choices":[{"delta":{},"finish_reason":"stop"}],"usage":{"prompt_tokens":5,"completion_tokens":2,"total_tokens":7}}"#,
        );
        process_chunk(chunk, &mut state, "OpenAI").unwrap();

        match state.finish_event() {
            StreamEvent::Finish { usage, reason } => {
                assert_eq!(usage.total_tokens, 7);
                assert_eq!(reason.unified, FinishReasonKind::Stop);
            }
            other => panic!("Expected Finish event, got {:?}", other),
        }
    }

    #[test]
    fn test_error_chunk_is_provider_error() {
        let mut state = StreamState::default();
        let chunk = parse(r#"{"error":{"message":"rate limited","type":"requests","code":"429"}}"#);
        let err = process_chunk(chunk, &mut state, "Azure OpenAI").unwrap_err();
        assert!(matches!(err, Error::Provider(ref m) if m == "Azure OpenAI API error: [429] rate limited"));
    }
}
