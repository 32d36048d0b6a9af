use crate::application::ports::{ClassifierError, DiseaseClassifier};
use crate::domain::DiseaseCode;

/// Offline stand-in for the classification lookup: never returns codes.
pub struct ScaffoldClassifier;

#[async_trait::async_trait]
impl DiseaseClassifier for ScaffoldClassifier {
    async fn classify(&self, _query: &str) -> Result<Vec<DiseaseCode>, ClassifierError> {
        Ok(Vec::new())
    }
}
