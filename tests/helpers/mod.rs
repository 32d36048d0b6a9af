use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use futures::stream::{self, BoxStream};

use medlens::application::ports::{
    ChatModel, ChatModelError, ClassifierError, DiseaseClassifier, FileLoader, FileLoaderError,
    LlmClient, LlmClientError, UploadStore,
};
use medlens::domain::{DiseaseCode, Document, DocumentId, Message, StoragePath, UploadCategory};
use medlens::infrastructure::storage::LocalUploadStore;

pub fn create_test_store() -> (tempfile::TempDir, Arc<LocalUploadStore>) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf()).unwrap();
    (dir, Arc::new(store))
}

pub fn byte_stream(content: &[u8]) -> BoxStream<'static, Result<Bytes, std::io::Error>> {
    Box::pin(stream::iter(vec![Ok(Bytes::copy_from_slice(content))]))
}

/// Stores `content` as a document upload and returns its key.
pub async fn put_document(
    store: &LocalUploadStore,
    filename: &str,
    content: &[u8],
) -> StoragePath {
    let path = StoragePath::new(UploadCategory::Document, &DocumentId::new(), filename);
    store.store(&path, byte_stream(content)).await.unwrap();
    path
}

/// Returns the stored bytes as UTF-8 and counts calls.
#[derive(Default)]
pub struct CountingFileLoader {
    calls: AtomicUsize,
}

impl CountingFileLoader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileLoader for CountingFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::extraction(document, e.to_string()))
    }
}

pub struct FailingFileLoader;

#[async_trait::async_trait]
impl FileLoader for FailingFileLoader {
    async fn extract_text(
        &self,
        _data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        Err(FileLoaderError::extraction(document, "corrupt file"))
    }
}

pub struct StubLlmClient {
    answer: Option<String>,
    inputs: Mutex<Vec<String>>,
}

impl StubLlmClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl LlmClient for StubLlmClient {
    async fn complete(&self, _system_prompt: &str, input: &str) -> Result<String, LlmClientError> {
        self.inputs.lock().unwrap().push(input.to_string());
        self.answer
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("HTTP 503".to_string()))
    }
}

pub struct StubClassifier {
    codes: Option<Vec<DiseaseCode>>,
    queries: Mutex<Vec<String>>,
}

impl StubClassifier {
    pub fn returning(codes: Vec<DiseaseCode>) -> Self {
        Self {
            codes: Some(codes),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            codes: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DiseaseClassifier for StubClassifier {
    async fn classify(&self, query: &str) -> Result<Vec<DiseaseCode>, ClassifierError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.codes
            .clone()
            .ok_or_else(|| ClassifierError::ApiRequestFailed("HTTP 500".to_string()))
    }
}

/// Records every history it receives and answers `reply <n>`.
#[derive(Default)]
pub struct RecordingChatModel {
    histories: Mutex<Vec<Vec<Message>>>,
}

impl RecordingChatModel {
    pub fn calls(&self) -> usize {
        self.histories.lock().unwrap().len()
    }

    pub fn last_history(&self) -> Vec<Message> {
        self.histories
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ChatModel for RecordingChatModel {
    async fn reply(&self, history: &[Message]) -> Result<String, ChatModelError> {
        let mut histories = self.histories.lock().unwrap();
        histories.push(history.to_vec());
        Ok(format!("reply {}", histories.len()))
    }
}

pub struct FailingChatModel;

#[async_trait::async_trait]
impl ChatModel for FailingChatModel {
    async fn reply(&self, _history: &[Message]) -> Result<String, ChatModelError> {
        Err(ChatModelError::ApiRequestFailed("HTTP 500".to_string()))
    }
}

/// Fails only on the given (1-based) call, otherwise behaves like
/// [`RecordingChatModel`].
pub struct FlakyChatModel {
    fail_on: usize,
    calls: AtomicUsize,
    inner: RecordingChatModel,
}

impl FlakyChatModel {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: call,
            calls: AtomicUsize::new(0),
            inner: RecordingChatModel::default(),
        }
    }

    pub fn last_history(&self) -> Vec<Message> {
        self.inner.last_history()
    }
}

#[async_trait::async_trait]
impl ChatModel for FlakyChatModel {
    async fn reply(&self, history: &[Message]) -> Result<String, ChatModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(ChatModelError::ApiRequestFailed("HTTP 503".to_string()));
        }
        self.inner.reply(history).await
    }
}

pub fn disease_code(code: &str, title: &str) -> DiseaseCode {
    DiseaseCode {
        code: code.to_string(),
        title: title.to_string(),
    }
}
