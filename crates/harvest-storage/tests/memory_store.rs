use std::time::Duration;

use harvest_storage::client::StorageSettings;
use harvest_storage::error::StorageError;
use harvest_storage::mock::{MemoryStore, StoredObject};
use harvest_storage::store::ReportStore;
use pretty_assertions::assert_eq;

fn settings() -> StorageSettings {
    StorageSettings {
        endpoint: "https://s3.example.test".to_string(),
        region: "us-south".to_string(),
        bucket: "reports".to_string(),
        access_key_id: "AKIAEXAMPLEKEY1234".to_string(),
        secret_access_key: "secret".to_string(),
        force_path_style: true,
    }
}

#[tokio::test]
async fn put_then_presign_round_trip() {
    let store = MemoryStore::new();
    store
        .put_report("a.pdf", b"%PDF-1.3".to_vec(), "application/pdf")
        .await
        .unwrap();

    let url = store
        .presigned_url("a.pdf", Duration::from_secs(432_000))
        .await
        .unwrap();

    assert_eq!(url, "memory://a.pdf?expires=432000");
    assert_eq!(
        store.get("a.pdf"),
        Some(StoredObject {
            body: b"%PDF-1.3".to_vec(),
            content_type: "application/pdf".to_string(),
        })
    );
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn presign_of_missing_key_fails() {
    let store = MemoryStore::new();
    let err = store
        .presigned_url("missing.pdf", Duration::from_secs(60))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Presign(_)));
}

#[tokio::test]
async fn failing_store_reports_put_error() {
    let store = MemoryStore::new().failing_puts();
    let err = store
        .put_report("a.pdf", vec![1, 2, 3], "application/pdf")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::PutObject(_)));
    assert!(store.keys().is_empty());
    assert_eq!(store.calls(), 1);
}

#[test]
fn settings_debug_hides_secrets() {
    let rendered = format!("{:?}", settings());
    assert!(!rendered.contains("AKIAEXAMPLEKEY1234"));
    assert!(!rendered.contains("\"secret\""));
    assert!(rendered.contains("AKIA...1234"));
}

#[test]
fn empty_bucket_is_a_config_error() {
    let mut s = settings();
    s.bucket = "  ".to_string();
    let err = s.validate().unwrap_err();
    assert!(matches!(err, StorageError::Config(msg) if msg.contains("bucket")));
}
