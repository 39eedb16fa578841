//! Span helpers shared by the runtime and the CLI

/// Create a span covering one chat turn
///
/// # Example
///
/// ```rust
/// use parley_observability::chat_turn_span;
///
/// let span = chat_turn_span!("GPT-4o", 3usize);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! chat_turn_span {
    ($model:expr, $turn:expr) => {
        tracing::info_span!(
            "runtime.send",
            model = $model,
            turn = $turn,
            context.kind = tracing::field::Empty,
            reply.chars = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Create a span for a provider round-trip
#[macro_export]
macro_rules! provider_request_span {
    ($provider:expr, $deployment:expr) => {
        tracing::info_span!(
            "provider.stream",
            provider = $provider,
            deployment = $deployment,
            fragments = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and log it.
///
/// The span must declare `error` and `error.message` fields for the
/// values to be kept; the log line is emitted regardless.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span
///
/// ```rust
/// use parley_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
