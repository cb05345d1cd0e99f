//! API routes for the chat server

pub mod sessions;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post, put},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/:id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        // Uploads get a larger body limit
        .route(
            "/sessions/:id/documents",
            put(sessions::upload_documents).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/sessions/:id/chat", post(sessions::chat))
        .route("/sessions/:id/clear", post(sessions::clear_session))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let config = state.config();
    axum::Json(serde_json::json!({
        "name": "chatpdf",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Chat with uploaded PDFs using keyword retrieval and a local Ollama model",
        "endpoints": {
            "POST /api/sessions": "Start a chat session",
            "GET /api/sessions/:id": "Session transcript and cache state",
            "DELETE /api/sessions/:id": "End a session",
            "PUT /api/sessions/:id/documents": "Attach PDFs (multipart, replaces the current set)",
            "POST /api/sessions/:id/chat": "Ask a question about the attached PDFs",
            "POST /api/sessions/:id/clear": "Clear transcript and chunk cache"
        },
        "config": {
            "model": config.llm.model,
            "ollama_url": config.llm.base_url,
            "chunk_size": config.chunking.chunk_size,
            "top_k": config.retrieval.top_k,
        },
        "active_sessions": state.session_count(),
    }))
}
