use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::favorites::FavoriteRestaurantList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::{Ack, ApiResponse},
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-favorites", get(list_favorites))
        .route("/{restaurant_id}", post(add_favorite).delete(remove_favorite))
}

#[utoipa::path(
    post,
    path = "/api/favorites/{restaurant_id}",
    params(
        ("restaurant_id" = i64, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 201, description = "Added to favorites", body = Ack),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Already in favorites")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    let resp = favorite_service::add_favorite(&state.pool, &user, restaurant_id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{restaurant_id}",
    params(
        ("restaurant_id" = i64, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = Ack),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Not in favorites")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Ack>> {
    let resp = favorite_service::remove_favorite(&state.pool, &user, restaurant_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/favorites/my-favorites",
    responses(
        (status = 200, description = "Caller's favorites, most recent first", body = ApiResponse<FavoriteRestaurantList>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoriteRestaurantList>>> {
    let resp = favorite_service::list_favorites(&state.pool, &user).await?;
    Ok(Json(resp))
}
