use super::*;
use crate::llm::types::{ChatResponse, ContentBlock};

// =========================================================================
// MockLlm
// =========================================================================

struct MockLlm {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    fn failing(status: u16) -> Self {
        Self { reply: Err(status), prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, _max_tokens: u32, _system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .extend(messages.iter().map(|m| m.content.as_text()));
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: vec![ContentBlock::Text { text: text.clone() }],
                model: "mock".into(),
                stop_reason: "end_turn".into(),
                input_tokens: 0,
                output_tokens: 0,
            }),
            Err(status) => Err(LlmError::ApiResponse { status: *status, body: "boom".into() }),
        }
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =========================================================================
// prompt and cleaning
// =========================================================================

#[test]
fn prompt_embeds_recent_texts_in_order() {
    let prompt = build_prompt(&texts(&["Coding", "Reading"]));
    assert!(prompt.contains("\"Coding, Reading\""));
    assert!(prompt.contains("2-5 words"));
    assert!(prompt.contains("emojis"));
}

#[test]
fn clean_strips_whitespace_and_surrounding_quotes() {
    assert_eq!(clean_suggestion("  \"Chasing deadlines\"\n"), "Chasing deadlines");
    assert_eq!(clean_suggestion("'Deep in thought'"), "Deep in thought");
    assert_eq!(clean_suggestion("\" 'Nested' \""), "Nested");
}

#[test]
fn clean_keeps_inner_apostrophes() {
    assert_eq!(clean_suggestion("Rock'n'rolling"), "Rock'n'rolling");
}

#[test]
fn clean_of_only_quotes_is_empty() {
    assert_eq!(clean_suggestion(" \"\" "), "");
}

// =========================================================================
// suggest
// =========================================================================

#[tokio::test]
async fn suggest_returns_cleaned_reply() {
    let llm = MockLlm::replying("\"Brewing the perfect coffee\"");
    let out = suggest(&llm, &texts(&["Ready to connect!"])).await.unwrap();
    assert_eq!(out, "Brewing the perfect coffee");

    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Ready to connect!"));
}

#[tokio::test]
async fn suggest_empty_reply_falls_back() {
    let llm = MockLlm::replying("  ''  ");
    let out = suggest(&llm, &[]).await.unwrap();
    assert_eq!(out, FALLBACK_SUGGESTION);
}

#[tokio::test]
async fn suggest_wraps_provider_errors() {
    let llm = MockLlm::failing(503);
    let err = suggest(&llm, &texts(&["x"])).await.unwrap_err();
    assert!(matches!(err, SuggestionError::Unavailable(LlmError::ApiResponse { status: 503, .. })));
    assert_eq!(err.error_code(), "E_SUGGESTION_UNAVAILABLE");
    assert!(err.retryable());
}

#[tokio::test]
async fn suggest_client_error_is_not_retryable() {
    let err = suggest(&MockLlm::failing(400), &[]).await.unwrap_err();
    assert!(!err.retryable());
}

// =========================================================================
// SuggestionGate
// =========================================================================

#[test]
fn gate_refuses_second_request_for_same_slot() {
    let gate = SuggestionGate::new();
    let permit = gate.try_acquire(Slot::Friend1).unwrap();
    assert!(gate.is_in_flight(Slot::Friend1));
    assert!(matches!(gate.try_acquire(Slot::Friend1), Err(SuggestionError::InFlight(Slot::Friend1))));

    // The other slot is independent.
    let other = gate.try_acquire(Slot::Friend2).unwrap();
    drop(other);

    drop(permit);
    assert!(!gate.is_in_flight(Slot::Friend1));
    assert!(gate.try_acquire(Slot::Friend1).is_ok());
}

#[test]
fn gate_clones_share_state() {
    let gate = SuggestionGate::new();
    let clone = gate.clone();
    let _permit = gate.try_acquire(Slot::Friend2).unwrap();
    assert!(clone.is_in_flight(Slot::Friend2));
}
