use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError
// =============================================================================

#[test]
fn error_codes() {
    assert_eq!(LlmError::MissingApiKey { var: "KEY".into() }.error_code(), "E_MISSING_API_KEY");
    assert_eq!(LlmError::ApiRequest("timeout".into()).error_code(), "E_API_REQUEST");
    assert_eq!(LlmError::ApiResponse { status: 500, body: "oops".into() }.error_code(), "E_API_RESPONSE");
    assert_eq!(LlmError::ApiParse("json".into()).error_code(), "E_API_PARSE");
    assert_eq!(LlmError::HttpClientBuild("tls".into()).error_code(), "E_HTTP_CLIENT_BUILD");
}

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("x".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
}

#[test]
fn missing_api_key_message_names_var() {
    let err = LlmError::MissingApiKey { var: "API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var API_KEY not set");
}

// =============================================================================
// Content / ChatResponse
// =============================================================================

#[test]
fn response_text_joins_text_blocks_only() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Thinking { thinking: "hmm".into() },
            ContentBlock::Text { text: "Brewing ".into() },
            ContentBlock::Unknown,
            ContentBlock::Text { text: "coffee".into() },
        ],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.text(), "Brewing coffee");
}

#[test]
fn content_as_text() {
    assert_eq!(Content::Text("plain".into()).as_text(), "plain");
    let blocks = Content::Blocks(vec![ContentBlock::Text { text: "a".into() }, ContentBlock::Text { text: "b".into() }]);
    assert_eq!(blocks.as_text(), "ab");
}

#[test]
fn content_block_unknown_type_deserializes() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"image","source":{}}"#).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

#[test]
fn user_message_serializes_as_plain_text() {
    let json = serde_json::to_value(Message::user("hi")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "hi" }));
}
