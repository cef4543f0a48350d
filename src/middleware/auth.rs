use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{error::AppError, services::auth_service::resolve_token, state::AppState};

/// Identity of the caller, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// The single ownership rule: only the user stored as owner may mutate a record.
pub fn ensure_owner(user: &AuthUser, owner_id: i64) -> Result<(), AppError> {
    if user.user_id != owner_id {
        return Err(AppError::Forbidden(
            "You can only modify your own restaurants".into(),
        ));
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Access denied. Missing token.".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Access denied. Missing token.".into()))?;

        let state = AppState::from_ref(state);
        resolve_token(token, &state.config.jwt_secret)
    }
}
