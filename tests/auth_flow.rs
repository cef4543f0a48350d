mod common;

use axum::http::StatusCode;
use restaurant_registry::{
    dto::auth::RegisterRequest, error::AppError, services::auth_service::register_user,
};

use common::{db_state, unique};

fn registration(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
        password: Some("password123".into()),
    }
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
    let Some(state) = db_state().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", unique("twice"));

    register_user(&state.pool, registration("first", &email)).await?;
    let err = register_user(&state.pool, registration("second", &email))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "This email is already in use");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(count, 1);
    Ok(())
}
