mod chat_model;
mod conversation_repository;
mod disease_classifier;
mod file_loader;
mod llm_client;
mod repository_error;
mod upload_store;

pub use chat_model::{ChatModel, ChatModelError};
pub use conversation_repository::ConversationRepository;
pub use disease_classifier::{ClassifierError, DiseaseClassifier};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use upload_store::{UploadStore, UploadStoreError};
