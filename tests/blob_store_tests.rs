use bytes::Bytes;
use record_manager::blob_store::{BlobStore, BlobStoreError, LocalStore};

#[tokio::test]
async fn test_local_store_put_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let data = Bytes::from("fake jpeg bytes");
    store.put("received_image.jpg", data.clone()).await.unwrap();

    let retrieved = store.get("received_image.jpg").await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn test_local_store_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("received_image.jpg", Bytes::from("first"))
        .await
        .unwrap();
    store
        .put("received_image.jpg", Bytes::from("second"))
        .await
        .unwrap();

    let data = store.get("received_image.jpg").await.unwrap();
    assert_eq!(data, Bytes::from("second"));
}

#[tokio::test]
async fn test_local_store_get_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let result = store.get("missing.jpg").await;
    assert!(matches!(result.unwrap_err(), BlobStoreError::NotFound(_)));
}

#[tokio::test]
async fn test_local_store_purge_all() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("blobs")).unwrap();

    store
        .put("received_image.jpg", Bytes::from("data"))
        .await
        .unwrap();

    store.purge_all().await.unwrap();

    let result = store.get("received_image.jpg").await;
    assert!(matches!(result.unwrap_err(), BlobStoreError::NotFound(_)));

    // The directory comes back empty and stays usable
    store
        .put("received_image.jpg", Bytes::from("fresh"))
        .await
        .unwrap();
    let data = store.get("received_image.jpg").await.unwrap();
    assert_eq!(data, Bytes::from("fresh"));
}

#[tokio::test]
async fn test_local_store_purge_all_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("blobs")).unwrap();

    // Purging an already empty store is not an error
    store.purge_all().await.unwrap();
    store.purge_all().await.unwrap();
}
