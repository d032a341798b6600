use clarity_gemini::client::CLARITY_BOT_INSTRUCTION;
use clarity_gemini::Error;
use mockito::Matcher;
use serde_json::json;

use crate::mock_server::{error_reply, text_reply, MockServerFixture};

const MODEL: &str = "gemini-3-pro-preview";

#[tokio::test]
async fn test_chat_session_carries_history() {
    let fixture = MockServerFixture::new().await;
    let system = json!({ "parts": [{ "text": CLARITY_BOT_INSTRUCTION }] });

    let first = fixture
        .mock_generate(
            MODEL,
            Matcher::Json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "What is fluff?" }] }],
                "systemInstruction": system,
            })),
            200,
            &text_reply("Words that add no value."),
        )
        .await;
    let second = fixture
        .mock_generate(
            MODEL,
            Matcher::Json(json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "What is fluff?" }] },
                    { "role": "model", "parts": [{ "text": "Words that add no value." }] },
                    { "role": "user", "parts": [{ "text": "Example?" }] }
                ],
                "systemInstruction": system,
            })),
            200,
            &text_reply("\"In today's fast-paced world...\""),
        )
        .await;

    let client = fixture.client();
    let session = client.create_chat_session();
    assert_eq!(
        session.send_message("What is fluff?").await.unwrap(),
        "Words that add no value."
    );
    assert_eq!(
        session.send_message("Example?").await.unwrap(),
        "\"In today's fast-paced world...\""
    );
    assert_eq!(session.history_len().await, 4);

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_chat_remote_failure_propagates() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_generate(
            MODEL,
            Matcher::Any,
            503,
            &error_reply(503, "The model is overloaded.", "UNAVAILABLE"),
        )
        .await;

    let session = fixture.client().create_chat_session();
    let err = session.send_message("Hi").await.unwrap_err();
    assert!(matches!(err, Error::Remote { status: 503, ref class, .. } if class == "overloaded"));
    assert_eq!(session.history_len().await, 0);
}
