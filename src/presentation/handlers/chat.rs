use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::ChatError;
use crate::domain::ConversationId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

pub const SESSION_ID_HEADER: &str = "x-session-id";

const CHAT_FAILURE_MESSAGE: &str = "Sorry, I couldn't process your request. Please try again.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[tracing::instrument(skip(state, headers, payload))]
pub async fn chat_handler<F, L>(
    State(state): State<AppState<F, L>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected chat request body");
            return error_response(StatusCode::BAD_REQUEST, "No message provided");
        }
    };

    let message = match request.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            tracing::warn!("Chat request with empty message");
            return error_response(StatusCode::BAD_REQUEST, "No message provided");
        }
    };

    let session = request
        .session_id
        .as_deref()
        .or_else(|| headers.get(SESSION_ID_HEADER).and_then(|v| v.to_str().ok()))
        .and_then(ConversationId::parse);

    tracing::debug!(prompt = %sanitize_prompt(&message), "Processing chat message");

    match state.chat_service.send(session, &message).await {
        Ok(reply) => {
            let session_id = reply.session_id.to_string();
            let mut response = Json(ChatResponse {
                response: reply.reply,
                session_id: session_id.clone(),
            })
            .into_response();
            if let Ok(value) = HeaderValue::from_str(&session_id) {
                response.headers_mut().insert(SESSION_ID_HEADER, value);
            }
            response
        }
        Err(ChatError::EmptyMessage) => {
            error_response(StatusCode::BAD_REQUEST, "No message provided")
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CHAT_FAILURE_MESSAGE)
        }
    }
}
