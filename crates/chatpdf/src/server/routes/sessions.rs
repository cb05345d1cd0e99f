//! Session endpoints: create, upload, chat, clear

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::session::{SessionSnapshot, TurnOutcome};
use crate::types::{ChatMessage, DocumentSet, UploadedFile};

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    /// Names of the currently attached files
    pub documents: Vec<String>,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub session_id: Uuid,
    pub documents: Vec<String>,
    pub total_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Answered,
    Rejected,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: TurnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Full transcript after the turn
    pub messages: Vec<ChatMessage>,
    pub chunk_count: usize,
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.create_session();
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let slot = state.session(&id)?;
    let slot = slot.lock().await;

    Ok(Json(SessionView {
        session_id: id,
        documents: slot.documents.filenames(),
        snapshot: slot.session.snapshot(),
    }))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.remove_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/sessions/:id/documents - replace the attached PDFs
pub async fn upload_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<DocumentsResponse>> {
    let slot = state.session(&id)?;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(Error::invalid_request(format!("Only PDF files are accepted: {}", filename)));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_request(format!("Failed to read {}: {}", filename, e)))?;

        tracing::info!("Session {}: received {} ({} bytes)", id, filename, data.len());
        files.push(UploadedFile::new(filename, data.to_vec()));
    }

    let documents = DocumentSet::new(files);
    let response = DocumentsResponse {
        session_id: id,
        documents: documents.filenames(),
        total_bytes: documents.total_bytes(),
    };

    slot.lock().await.documents = documents;

    Ok(Json(response))
}

/// POST /api/sessions/:id/chat
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) = request.map_err(|e| Error::invalid_request(e.body_text()))?;
    let slot = state.session(&id)?;
    let mut guard = slot.lock().await;
    let slot = &mut *guard;

    tracing::info!("Session {}: question \"{}\"", id, request.question);

    let outcome = state
        .pipeline()
        .handle_turn(&mut slot.session, &request.question, &slot.documents)
        .await?;

    let (status, answer, is_error) = match &outcome {
        TurnOutcome::Rejected => (TurnStatus::Rejected, None, None),
        TurnOutcome::Answered(turn) => (
            TurnStatus::Answered,
            Some(turn.answer.display_text()),
            Some(turn.answer.is_error()),
        ),
    };

    Ok(Json(ChatResponse {
        status,
        answer,
        is_error,
        messages: slot.session.transcript().messages(),
        chunk_count: slot.session.cache().chunks().len(),
    }))
}

/// POST /api/sessions/:id/clear - attached documents are kept
pub async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let slot = state.session(&id)?;
    let mut slot = slot.lock().await;
    slot.session.clear();

    tracing::info!("Session {} cleared", id);

    Ok(Json(SessionView {
        session_id: id,
        documents: slot.documents.filenames(),
        snapshot: slot.session.snapshot(),
    }))
}
