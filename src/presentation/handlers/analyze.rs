use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::AnalysisError;
use crate::domain::{DiseaseCode, ReportStatus};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub analysis: String,
    pub status: Option<ReportStatus>,
    /// Codes from the configured ICD release (ICD-11 MMS by default). The
    /// field name is kept for existing clients.
    pub icd10_classification: Vec<DiseaseCode>,
    pub classification_degraded: bool,
}

#[tracing::instrument(skip(state, payload))]
pub async fn analyze_handler<F, L>(
    State(state): State<AppState<F, L>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let file_path = match payload {
        Ok(Json(AnalyzeRequest {
            file_path: Some(path),
        })) if !path.trim().is_empty() => path,
        Ok(_) => return error_response(StatusCode::BAD_REQUEST, "No file path provided"),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected analyze request body");
            return error_response(StatusCode::BAD_REQUEST, "No file path provided");
        }
    };

    match state.analysis_service.analyze(file_path.trim()).await {
        Ok(result) => Json(AnalyzeResponse {
            message: "Analysis complete".to_string(),
            analysis: result.summary,
            status: result.status,
            icd10_classification: result.disease_codes,
            classification_degraded: result.classification_degraded,
        })
        .into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Document analysis failed");
                error_response(status, "Failed to analyze document")
            } else {
                tracing::warn!(error = %e, "Document analysis rejected");
                error_response(status, e.to_string())
            }
        }
    }
}

fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::InvalidPath(_)
        | AnalysisError::FileNotFound(_)
        | AnalysisError::UnsupportedFormat(_)
        | AnalysisError::NoTextExtracted(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Storage(_)
        | AnalysisError::Extraction { .. }
        | AnalysisError::Completion(_)
        | AnalysisError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
