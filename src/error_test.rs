use super::*;
use crate::llm::types::LlmError;
use crate::model::Slot;
use crate::storage::StorageError;

fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
    let status = err.status();
    let body = ErrorBody { code: err.error_code(), message: err.to_string(), retryable: err.retryable() };
    (status, serde_json::to_value(body).unwrap())
}

#[test]
fn unknown_slot_maps_to_404() {
    let (status, body) = body_json(ApiError::Store(StoreError::UnknownSlot("friend3".into())));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_UNKNOWN_SLOT");
    assert_eq!(body["message"], "unknown slot: friend3");
    assert_eq!(body["retryable"], false);
}

#[test]
fn validation_errors_map_to_422() {
    assert_eq!(ApiError::Store(StoreError::EmptyText).status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ApiError::StatusTooLong { max: 50 }.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ApiError::EmptyName.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ApiError::StatusTooLong { max: 50 }.error_code(), "E_STATUS_TOO_LONG");
}

#[test]
fn corrupt_and_storage_errors_map_to_500() {
    assert_eq!(
        ApiError::Store(StoreError::CorruptData("bad json".into())).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    let closed = ApiError::Store(StoreError::Storage(StorageError::Closed));
    assert_eq!(closed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(closed.error_code(), "E_STORAGE_CLOSED");
    assert!(!closed.retryable());
}

#[test]
fn storage_io_error_is_retryable() {
    let io = StorageError::Io { context: "write".into(), source: std::io::Error::other("disk full") };
    assert!(ApiError::Store(StoreError::Storage(io)).retryable());
}

#[test]
fn suggestion_errors_map_by_kind() {
    let unavailable = ApiError::Suggestion(SuggestionError::Unavailable(LlmError::ApiRequest("timeout".into())));
    assert_eq!(unavailable.status(), StatusCode::BAD_GATEWAY);
    assert!(unavailable.retryable());

    assert_eq!(
        ApiError::Suggestion(SuggestionError::NotConfigured).status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        ApiError::Suggestion(SuggestionError::InFlight(Slot::Friend1)).status(),
        StatusCode::CONFLICT
    );
}

#[test]
fn not_logged_in_maps_to_401() {
    let (status, body) = body_json(ApiError::NotLoggedIn);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E_NOT_LOGGED_IN");
}

#[test]
fn into_response_uses_mapped_status() {
    let response = ApiError::EmptyName.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
