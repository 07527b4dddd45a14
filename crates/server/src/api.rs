//! Routes and handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dispatcher::{
    ActionRequest, ClassifierError, ConversationContext, Dispatcher, MovieQueryService,
};

use crate::sessions::SessionStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub movies: Arc<dyn MovieQueryService>,
    pub sessions: Arc<SessionStore>,
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/popular", get(popular))
        .route("/recommend/:genre", get(recommend))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
    /// Optional session token; when present the conversation context
    /// persists across requests carrying the same token.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Classifier failure is the one condition surfaced as an HTTP error:
/// without intent text there is nothing to dispatch.
pub struct ApiError(ClassifierError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "classifier unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: format!("Serviço de classificação indisponível: {}", self.0),
            }),
        )
            .into_response()
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut ctx = match request.session_id.as_deref() {
        Some(session_id) => state.sessions.load(session_id),
        None => ConversationContext::new(),
    };

    let outcome = state
        .dispatcher
        .handle_turn(&mut ctx, &request.user_input)
        .await
        .map_err(ApiError)?;

    if let Some(session_id) = request.session_id.as_deref() {
        state.sessions.store(session_id, ctx);
    }

    info!(reply_len = outcome.response_text().len(), "chat turn served");
    Ok(Json(ChatResponse {
        response: outcome.response_text().to_string(),
    }))
}

async fn popular(State(state): State<AppState>) -> Json<ChatResponse> {
    Json(ChatResponse {
        response: run_query(&state, &ActionRequest::popular()).await,
    })
}

async fn recommend(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Json<ChatResponse> {
    Json(ChatResponse {
        response: run_query(&state, &ActionRequest::recommend(genre)).await,
    })
}

/// Direct lookups keep the dispatcher's policy: a failed movie query is a
/// normal textual reply, never an HTTP error.
async fn run_query(state: &AppState, request: &ActionRequest) -> String {
    match state.movies.query(request).await {
        Ok(text) => text,
        Err(err) => {
            warn!(action = ?request.action, error = %err, "movie query failed");
            format!("Erro ao buscar informações: {err}")
        }
    }
}
