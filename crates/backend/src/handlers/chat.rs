use axum::Json;

use contracts::chat::{ChatRequest, ChatResponse};

use crate::domain::catalog;
use crate::usecases::chat_search;

/// POST /chat
pub async fn chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    tracing::debug!("chat query: {}", request.message);
    let response = chat_search::engine::respond(catalog::catalog(), &request.message);
    Json(response)
}
