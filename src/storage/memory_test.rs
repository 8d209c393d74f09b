use super::*;

#[tokio::test]
async fn get_missing_key_is_none() {
    let kv = MemoryKv::new();
    assert_eq!(kv.get("nope").await.unwrap(), None);
}

#[tokio::test]
async fn set_overwrites_previous_value() {
    let kv = MemoryKv::new();
    kv.set("k", "one").await.unwrap();
    kv.set("k", "two").await.unwrap();
    assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("two"));
}

#[tokio::test]
async fn remove_absent_key_is_ok() {
    let kv = MemoryKv::new();
    kv.remove("ghost").await.unwrap();
    kv.set("k", "v").await.unwrap();
    kv.remove("k").await.unwrap();
    assert_eq!(kv.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn operations_fail_after_close() {
    let kv = MemoryKv::new();
    kv.set("k", "v").await.unwrap();
    kv.close().await.unwrap();
    assert!(matches!(kv.get("k").await, Err(StorageError::Closed)));
    assert!(matches!(kv.set("k", "w").await, Err(StorageError::Closed)));
    assert!(matches!(kv.remove("k").await, Err(StorageError::Closed)));
}
