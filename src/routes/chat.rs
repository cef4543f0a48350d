use axum::{Json, Router, extract::State, routing::post};
use serde_json::Value;

use crate::{
    dto::chat::ChatRequest, error::AppResult, services::chat_service::send_message,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chatbot reply, passed through as returned"),
        (status = 400, description = "Message is required"),
        (status = 500, description = "Chatbot unreachable")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> AppResult<Json<Value>> {
    let reply = send_message(&state, payload).await?;
    Ok(Json(reply))
}
