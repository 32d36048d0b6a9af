use std::io;

use bytes::Bytes;
use futures::stream;

use medlens::application::ports::{UploadStore, UploadStoreError};
use medlens::domain::{DocumentId, StoragePath, UploadCategory};
use medlens::infrastructure::storage::LocalUploadStore;

use crate::helpers::{byte_stream, create_test_store};

fn document_path(name: &str) -> StoragePath {
    StoragePath::new(UploadCategory::Document, &DocumentId::new(), name)
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_persisted() {
    let (dir, store) = create_test_store();
    let path = document_path("test.pdf");

    let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
    let size = store
        .store(&path, Box::pin(stream::iter(chunks)))
        .await
        .unwrap();

    assert_eq!(size, 11);
    assert_eq!(
        std::fs::read(dir.path().join(path.as_str())).unwrap(),
        b"hello world"
    );
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_test_store();
    let path = document_path("test.pdf");

    store.store(&path, byte_stream(b"test content")).await.unwrap();

    assert_eq!(store.fetch(&path).await.unwrap(), b"test content");
    assert!(store.exists(&path).await.unwrap());
}

#[tokio::test]
async fn given_unknown_key_when_fetching_then_not_found() {
    let (_dir, store) = create_test_store();
    let path = document_path("missing.pdf");

    assert!(!store.exists(&path).await.unwrap());
    assert!(matches!(
        store.fetch(&path).await,
        Err(UploadStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_io_error_and_no_file() {
    let (dir, store) = create_test_store();
    let path = document_path("broken.pdf");

    let chunks = vec![Ok(Bytes::from("partial")), Err(io::Error::other("reset"))];
    let result = store.store(&path, Box::pin(stream::iter(chunks))).await;

    assert!(matches!(result, Err(UploadStoreError::Io(_))));
    assert!(!dir.path().join(path.as_str()).exists());
}

#[test]
fn given_missing_root_when_creating_store_then_directory_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().join("nested").join("uploads");

    let store = LocalUploadStore::new(root.clone()).unwrap();
    LocalUploadStore::new(root.clone()).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}
