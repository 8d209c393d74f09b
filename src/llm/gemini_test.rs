use super::*;

fn make_response(parts: serde_json::Value, finish_reason: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": finish_reason
        }],
        "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 4 },
        "modelVersion": "gemini-2.5-flash-001"
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Exploring new horizons" }]), "STOP");
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.text(), "Exploring new horizons");
    assert_eq!(resp.model, "gemini-2.5-flash-001");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 42);
    assert_eq!(resp.output_tokens, 4);
}

#[test]
fn parse_skips_thought_parts() {
    let json = make_response(
        serde_json::json!([
            { "text": "The user seems busy...", "thought": true },
            { "text": "Mastering the art of naps" }
        ]),
        "STOP",
    );
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.content.len(), 1);
    assert_eq!(resp.text(), "Mastering the art of naps");
}

#[test]
fn parse_max_tokens_without_text() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "role": "model" }, "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert!(resp.content.is_empty());
    assert_eq!(resp.stop_reason, "max_tokens");
    assert_eq!(resp.model, "gemini-2.5-flash");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn parse_missing_candidates() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    assert!(matches!(parse_response(&json, "m"), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("<html>", "m"), Err(LlmError::ApiParse(_))));
}

#[test]
fn request_maps_roles_and_system_instruction() {
    let messages = vec![
        Message::user("hi"),
        Message { role: "assistant".into(), content: crate::llm::types::Content::Text("hello".into()) },
    ];
    let body = serde_json::to_value(build_request(64, "be brief", &messages)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "systemInstruction": { "parts": [{ "text": "be brief" }] },
            "contents": [
                { "role": "user", "parts": [{ "text": "hi" }] },
                { "role": "model", "parts": [{ "text": "hello" }] }
            ],
            "generationConfig": { "maxOutputTokens": 64 }
        })
    );
}

#[test]
fn request_omits_blank_system_instruction() {
    let body = serde_json::to_value(build_request(8, "", &[Message::user("x")])).unwrap();
    assert!(body.get("systemInstruction").is_none());
}
