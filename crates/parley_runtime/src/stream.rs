//! Streamed fragments to display updates and a final reply.

use futures::StreamExt;
use parley_llms::{GenerateStream, StreamEvent};
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};

/// Marker shown after the text while a reply is still streaming
pub const CURSOR: &str = "▌";

/// Where a reply is rendered as it arrives.
pub trait DisplaySurface {
    /// Show the in-progress reply, cursor marker included.
    fn update(&mut self, display: &str);

    /// Show the complete reply without the marker.
    fn finish(&mut self, text: &str);

    /// The stream failed; drop whatever is on screen for this reply.
    fn abort(&mut self) {}
}

/// Concatenates fragments in arrival order.
#[derive(Debug, Default, Clone)]
pub struct StreamAccumulator {
    text: String,
    fragments: usize,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the display string with the cursor.
    /// Empty fragments change nothing.
    pub fn push(&mut self, fragment: &str) -> String {
        if !fragment.is_empty() {
            self.text.push_str(fragment);
            self.fragments += 1;
        }
        self.display()
    }

    pub fn display(&self) -> String {
        format!("{}{}", self.text, CURSOR)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Final reply, without the cursor.
    pub fn finish(self) -> String {
        self.text
    }
}

/// Drive `surface` from `stream` until it ends.
///
/// Returns the full reply on natural completion. Any error item aborts:
/// the partial text is dropped and `StreamingTransport` is returned.
pub async fn accumulate(
    mut stream: GenerateStream,
    surface: &mut dyn DisplaySurface,
) -> Result<String> {
    let mut acc = StreamAccumulator::new();

    while let Some(item) = stream.next().await {
        let message = match item {
            Ok(StreamEvent::TextDelta { delta, .. }) => {
                if !delta.is_empty() {
                    surface.update(&acc.push(&delta));
                }
                continue;
            }
            Ok(StreamEvent::Start { id }) => {
                debug!(id = %id, "reply stream started");
                continue;
            }
            Ok(StreamEvent::Finish { usage, reason }) => {
                debug!(
                    total_tokens = usage.total_tokens,
                    reason = ?reason.unified,
                    "reply stream finished"
                );
                continue;
            }
            Ok(StreamEvent::Error { message }) => message,
            Err(e) => e.to_string(),
        };

        warn!(
            fragments = acc.fragment_count(),
            error = %message,
            "reply stream failed, discarding partial text"
        );
        surface.abort();
        return Err(RuntimeError::StreamingTransport(message));
    }

    let text = acc.finish();
    surface.finish(&text);
    Ok(text)
}
