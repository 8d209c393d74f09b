use super::*;

#[test]
fn parse_slot_accepts_fixed_ids() {
    assert_eq!(parse_slot("friend1").unwrap(), Slot::Friend1);
    assert_eq!(parse_slot("friend2").unwrap(), Slot::Friend2);
}

#[test]
fn parse_slot_rejects_unknown_as_not_found() {
    let err = parse_slot("friend3").unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::UnknownSlot(ref s)) if s == "friend3"));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthz_is_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[test]
fn app_builds_with_test_state() {
    let _router = app(crate::state::test_helpers::test_app_state());
}
