//! Azure OpenAI streaming against a local mock server

use futures::StreamExt;
use parley_llms::providers::azure::AzureConfig;
use parley_llms::{
    AzureOpenAIProvider, ContentPart, Error, GenerateRequest, Message, Provider, Role, StreamEvent,
};

const DEPLOYMENT_PATH: &str = "/openai/deployments/gpt-4o/chat/completions";

fn sse_body(chunks: &[&str]) -> String {
    let mut body = String::new();
    for chunk in chunks {
        body.push_str("data: ");
        body.push_str(chunk);
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn provider(server: &mockito::Server) -> AzureOpenAIProvider {
    AzureOpenAIProvider::new(AzureConfig::new(server.url(), "test-key")).unwrap()
}

#[tokio::test]
async fn streams_fragments_in_order() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", DEPLOYMENT_PATH)
        .match_query(mockito::Matcher::UrlEncoded(
            "api-version".into(),
            "2024-02-01".into(),
        ))
        .match_header("api-key", "test-key")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"stream":true,"messages":[{"role":"user","content":[{"type":"text","text":"what is this?"},{"type":"image_url","image_url":{"url":"data:image/png;base64,AA=="}}]}]}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&[
            r#"{"id":"","choices":[],"prompt_filter_results":[]}"#,
            r#"{"id":"chatcmpl-9","choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}"#,
            r#"{"id":"chatcmpl-9","choices":[{"index":0,"delta":{"content":"A red "}}]}"#,
            r#"{"id":"chatcmpl-9","choices":[{"index":0,"delta":{"content":"square."},"finish_reason":"stop"}]}"#,
        ]))
        .create_async()
        .await;

    let request = GenerateRequest::new(
        "gpt-4o",
        vec![Message::new(
            Role::User,
            vec![
                ContentPart::text("what is this?"),
                ContentPart::image("data:image/png;base64,AA=="),
            ],
        )],
    );

    let mut stream = provider(&server).stream(request).await?;
    let mut fragments = Vec::new();
    let mut finished = false;
    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::TextDelta { delta, .. } => fragments.push(delta),
            StreamEvent::Finish { .. } => finished = true,
            _ => {}
        }
    }

    assert_eq!(fragments, vec!["A red ", "square."]);
    assert!(finished);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn error_status_surfaces_as_provider_error() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", DEPLOYMENT_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":{"code":"401","message":"Access denied"}}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new("gpt-4o", vec![Message::new(Role::User, "hi")]);
    let mut stream = provider(&server).stream(request).await?;

    let first = stream.next().await.expect("stream yields an item");
    match first {
        Err(Error::Provider(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("Access denied"));
        }
        other => panic!("Expected provider error, got {:?}", other),
    }
    assert!(stream.next().await.is_none());
    Ok(())
}
