use async_trait::async_trait;
use clarity_gemini::credentials::{CredentialStore, KeyPrompt, KeySelector, StoreKeySelector};
use clarity_gemini::panels::{
    CHAT_ERROR_REPLY, CHAT_GREETING, CHAT_NEEDS_KEY_REPLY, IMAGE_KEY_ERROR,
};
use clarity_gemini::{
    AnalyzerPanel, ChatMessage, ChatPanel, Error, ImagePanel, ImageSize, KeyGate, MemoryStore,
    Result,
};
use mockito::Matcher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::fake_transport::FakeTransport;
use crate::mock_server::{text_reply, MockServerFixture, TEST_KEY};

/// Never has a key; the selection flow always fails.
#[derive(Default)]
struct DenyingSelector {
    opened: AtomicUsize,
}

#[async_trait]
impl KeySelector for DenyingSelector {
    async fn has_selected_key(&self) -> Result<bool> {
        Ok(false)
    }

    async fn open_select_key(&self) -> Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Err(Error::no_credential("user closed the dialog"))
    }
}

fn denying_gate() -> (KeyGate, Arc<DenyingSelector>) {
    let selector = Arc::new(DenyingSelector::default());
    (KeyGate::new(selector.clone()), selector)
}

/// Prompt that answers with a fixed key, as if the user typed it.
struct TypedKey(&'static str);

#[async_trait]
impl KeyPrompt for TypedKey {
    async fn prompt_for_key(&self) -> Result<Option<String>> {
        Ok(Some(format!("  {}\n", self.0)))
    }
}

const CANCEL_AFTER: Duration = Duration::from_millis(50);
const SLOW_REPLY: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_analyzer_panel_success() {
    let transport = FakeTransport::new();
    let panel = AnalyzerPanel::new(transport.client(), KeyGate::permissive());
    assert!(!panel.can_submit());

    panel.analyze().await;
    assert_eq!(transport.call_count(), 0);

    panel.set_text("An article about sourdough starters.");
    assert!(panel.can_submit());
    panel.analyze().await;

    let state = panel.state();
    let result = state.result.as_ref().expect("analysis result");
    assert_eq!(result.score, 77);
    assert!(state.error.is_none());
    assert!(!state.is_loading());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_analyzer_panel_blocked_by_gate() {
    let transport = FakeTransport::new();
    let (gate, selector) = denying_gate();
    let panel = AnalyzerPanel::new(transport.client(), gate);
    panel.set_text("Some text");

    panel.analyze().await;

    assert_eq!(transport.call_count(), 0);
    assert_eq!(selector.opened.load(Ordering::SeqCst), 1);
    let state = panel.state();
    assert!(state.result.is_none());
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_analyzer_panel_reports_remote_error() {
    let transport = FakeTransport::failing();
    let panel = AnalyzerPanel::new(transport.client(), KeyGate::permissive());
    panel.set_text("Some text");
    panel.analyze().await;

    let state = panel.state();
    assert!(state.result.is_none());
    assert!(state.error.unwrap().contains("internal"));
    assert!(panel.can_submit());
}

#[tokio::test]
async fn test_chat_panel_starts_with_greeting() {
    let panel = ChatPanel::new(FakeTransport::new().client(), KeyGate::permissive());
    assert_eq!(panel.messages(), vec![ChatMessage::model(CHAT_GREETING)]);
    assert!(!panel.is_open());
    assert!(panel.toggle());
    assert!(panel.is_open());
    assert!(!panel.has_session());
}

#[tokio::test]
async fn test_chat_panel_ignores_blank_input() {
    let transport = FakeTransport::new();
    let panel = ChatPanel::new(transport.client(), KeyGate::permissive());
    panel.send("   ").await;
    assert_eq!(panel.messages().len(), 1);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_chat_panel_rapid_sends_keep_order() {
    let transport = FakeTransport::slow_first(Duration::from_millis(50));
    let panel = ChatPanel::new(transport.client(), KeyGate::permissive());

    tokio::join!(panel.send("first"), panel.send("second"));

    assert_eq!(
        panel.messages(),
        vec![
            ChatMessage::model(CHAT_GREETING),
            ChatMessage::user("first"),
            ChatMessage::user("second"),
            ChatMessage::model("re: first"),
            ChatMessage::model("re: second"),
        ]
    );
    assert!(!panel.is_typing());
    assert!(panel.has_session());
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_chat_panel_blocked_by_gate() {
    let transport = FakeTransport::new();
    let (gate, _) = denying_gate();
    let panel = ChatPanel::new(transport.client(), gate);

    panel.send("hello").await;

    assert_eq!(transport.call_count(), 0);
    assert!(!panel.has_session());
    assert_eq!(
        panel.messages_since(1),
        vec![ChatMessage::user("hello"), ChatMessage::model(CHAT_NEEDS_KEY_REPLY)]
    );
}

#[tokio::test]
async fn test_chat_panel_error_reply() {
    let panel = ChatPanel::new(FakeTransport::failing().client(), KeyGate::permissive());
    panel.send("hello").await;
    assert_eq!(
        panel.messages().last(),
        Some(&ChatMessage::model(CHAT_ERROR_REPLY))
    );
}

#[tokio::test]
async fn test_image_panel_generates_and_saves() {
    let transport = FakeTransport::new();
    let panel = ImagePanel::new(transport.client(), KeyGate::permissive());
    panel.set_prompt("A desk with a single notebook");
    panel.set_size(ImageSize::Size2K);
    panel.generate().await;

    let state = panel.state();
    assert!(state.error.is_none());
    assert!(state.image.unwrap().starts_with("data:image/png;base64,"));

    let path = std::env::temp_dir().join(format!("clarity-test-{}.png", std::process::id()));
    let written = panel.save_image(&path).await.unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), written);
    assert_eq!(&bytes[1..4], b"PNG");
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_image_panel_blocked_by_gate() {
    let transport = FakeTransport::new();
    let (gate, _) = denying_gate();
    let panel = ImagePanel::new(transport.client(), gate);
    panel.set_prompt("anything");
    panel.generate().await;

    assert_eq!(transport.call_count(), 0);
    assert_eq!(panel.state().error.as_deref(), Some(IMAGE_KEY_ERROR));
    assert!(matches!(
        panel.save_image("unused.png").await,
        Err(Error::NoImageData)
    ));
}

#[tokio::test]
async fn test_analyzer_panel_selects_key_then_uses_it() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_generate(
            "gemini-2.5-flash",
            Matcher::Any,
            200,
            &text_reply(r#"{"score": 64, "fluff": 20, "ai": 10, "summary": "Reasonable overview."}"#),
        )
        .await;

    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(fixture.client_with_store(store.clone()));
    let gate = KeyGate::new(Arc::new(StoreKeySelector::new(
        store.clone(),
        Arc::new(TypedKey(TEST_KEY)),
    )));
    assert!(!gate.has_key().await);

    let panel = AnalyzerPanel::new(client, gate.clone());
    panel.set_text("A short piece on compost.");
    panel.analyze().await;

    let state = panel.state();
    assert!(state.error.is_none(), "unexpected error: {:?}", state.error);
    assert_eq!(state.result.map(|r| r.score), Some(64));
    assert_eq!(store.load().as_deref(), Some(TEST_KEY));
    assert!(gate.has_key().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_panel_cancelled_send_clears_typing() {
    let transport = FakeTransport::slow_first(SLOW_REPLY);
    let panel = ChatPanel::new(transport.client(), KeyGate::permissive());

    let cancelled = tokio::time::timeout(CANCEL_AFTER, panel.send("hi")).await;
    assert!(cancelled.is_err());
    assert!(!panel.is_typing());
    assert_eq!(panel.messages_since(1), vec![ChatMessage::user("hi")]);

    panel.send("again").await;
    assert!(!panel.is_typing());
    assert_eq!(
        panel.messages_since(1),
        vec![
            ChatMessage::user("hi"),
            ChatMessage::user("again"),
            ChatMessage::model("re: again"),
        ]
    );
}

#[tokio::test]
async fn test_analyzer_panel_cancelled_analysis_can_resubmit() {
    let transport = FakeTransport::slow_first(SLOW_REPLY);
    let panel = AnalyzerPanel::new(transport.client(), KeyGate::permissive());
    panel.set_text("Some text");

    assert!(tokio::time::timeout(CANCEL_AFTER, panel.analyze()).await.is_err());
    assert!(!panel.state().is_loading());
    assert!(panel.can_submit());

    panel.analyze().await;
    assert_eq!(panel.state().result.map(|r| r.score), Some(77));
}

#[tokio::test]
async fn test_image_panel_cancelled_generation_can_resubmit() {
    let transport = FakeTransport::slow_first(SLOW_REPLY);
    let panel = ImagePanel::new(transport.client(), KeyGate::permissive());
    panel.set_prompt("A lighthouse at dusk");

    assert!(tokio::time::timeout(CANCEL_AFTER, panel.generate()).await.is_err());
    assert!(!panel.state().is_loading());
    assert!(panel.can_submit());
    assert!(panel.state().image.is_none());
}
