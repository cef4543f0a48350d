use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use password_hash::rand_core::OsRng;

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    state::AppState,
};
use crate::dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest};

pub async fn register_user(
    pool: &DbPool,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let (Some(username), Some(email), Some(password)) = (
        non_blank(payload.username),
        non_blank(payload.email),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("All fields are required".into()));
    };

    let password_hash = hash_password(&password)?;

    // The unique index on email arbitrates concurrent registrations.
    let user: User = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(username.as_str())
    .bind(email.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_duplicate(e, "This email is already in use"))?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(ApiResponse::success("Registration successful", user, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (Some(email), Some(password)) = (
        non_blank(payload.email),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("Email and password are required".into()));
    };

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(invalid_credentials()),
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = issue_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.jwt_expires_in_hours,
    )?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse { token, user },
        None,
    ))
}

pub async fn current_user(pool: &DbPool, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;

    match found {
        Some(u) => Ok(ApiResponse::success("Profile", u, None)),
        None => Err(AppError::not_found("User")),
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: i64, email: &str, secret: &str, hours: i64) -> AppResult<String> {
    let expiration = Duration::try_hours(hours)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Decode a bearer token into the caller's identity.
pub fn resolve_token(token: &str, secret: &str) -> AppResult<AuthUser> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired.".into()),
        _ => AppError::Unauthorized("Invalid token.".into()),
    })?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("Invalid token.".into()))?;

    Ok(AuthUser {
        user_id,
        email: decoded.claims.email,
    })
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Incorrect email or password".into())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_resolves_to_same_identity() {
        let token = issue_token(42, "chef@example.com", SECRET, 1).unwrap();
        let user = resolve_token(&token, SECRET).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "chef@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = issue_token(1, "a@example.com", "other-secret", 1).unwrap();
        let err = resolve_token(&token, SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token.");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = issue_token(1, "a@example.com", SECRET, -2).unwrap();
        let err = resolve_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Token expired.");
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        let err = issue_token(1, "a@example.com", SECRET, i64::MAX).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = resolve_token("not-a-jwt", SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token.");
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
