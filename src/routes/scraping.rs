use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::scraping::{TriggerScrapingRequest, TriggerScrapingResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::scraping_service::trigger_scraping,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/trigger", post(trigger))
}

#[utoipa::path(
    post,
    path = "/api/scraping/trigger",
    request_body = TriggerScrapingRequest,
    responses(
        (status = 200, description = "Workflow accepted the job", body = ApiResponse<TriggerScrapingResponse>),
        (status = 400, description = "City and keyword are required"),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Webhook missing or failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Scraping"
)]
pub async fn trigger(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<TriggerScrapingRequest>,
) -> AppResult<Json<ApiResponse<TriggerScrapingResponse>>> {
    let resp = trigger_scraping(&state, &user, payload).await?;
    Ok(Json(resp))
}
