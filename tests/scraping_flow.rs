mod common;

use axum::{Json, Router, http::StatusCode, routing::post};
use restaurant_registry::{
    dto::scraping::TriggerScrapingRequest, error::AppError,
    services::scraping_service::trigger_scraping,
};
use serde_json::{Value, json};

use common::{create_user, db_state_with, spawn_stub, unique};

async fn workflow(Json(body): Json<Value>) -> Json<Value> {
    assert!(body["userEmail"].as_str().is_some_and(|e| e.contains('@')));
    Json(json!({ "sheetUrl": "https://sheets.example.com/abc", "itemsScraped": 17 }))
}

async fn unstorable_workflow() -> Json<Value> {
    // Postgres text cannot hold a NUL byte, so the success row is rejected
    Json(json!({ "sheetUrl": "https://sheets.example.com/\u{0}", "itemsScraped": 3 }))
}

async fn failing_workflow() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "quota exceeded")
}

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    status: String,
    items_scraped: Option<i32>,
    sheet_url: Option<String>,
    error_message: Option<String>,
}

async fn logs_for(pool: &sqlx::PgPool, user_id: i64, keyword: &str) -> anyhow::Result<Vec<LogRow>> {
    Ok(sqlx::query_as::<_, LogRow>(
        "SELECT status, items_scraped, sheet_url, error_message FROM scraping_logs WHERE user_id = $1 AND keyword = $2",
    )
    .bind(user_id)
    .bind(keyword)
    .fetch_all(pool)
    .await?)
}

#[tokio::test]
async fn successful_trigger_is_logged_with_results() -> anyhow::Result<()> {
    let base = spawn_stub(Router::new().route("/scrape", post(workflow))).await;
    let Some(state) =
        db_state_with(|c| c.scraping_webhook_url = Some(format!("{base}/scrape"))).await?
    else {
        return Ok(());
    };
    let user = create_user(&state, "scraper").await?;
    let keyword = unique("tajine");

    let resp = trigger_scraping(
        &state,
        &user,
        TriggerScrapingRequest {
            city: Some("Marrakech".into()),
            keyword: Some(keyword.clone()),
        },
    )
    .await?;
    let data = resp.data.expect("data");
    assert_eq!(data.sheet_url.as_deref(), Some("https://sheets.example.com/abc"));

    let logs = logs_for(&state.pool, user.user_id, &keyword).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "success");
    assert_eq!(logs[0].items_scraped, Some(17));
    assert_eq!(logs[0].sheet_url.as_deref(), Some("https://sheets.example.com/abc"));
    assert_eq!(logs[0].error_message, None);
    Ok(())
}

#[tokio::test]
async fn failed_trigger_is_logged_and_reported() -> anyhow::Result<()> {
    let base = spawn_stub(Router::new().route("/scrape", post(failing_workflow))).await;
    let Some(state) =
        db_state_with(|c| c.scraping_webhook_url = Some(format!("{base}/scrape"))).await?
    else {
        return Ok(());
    };
    let user = create_user(&state, "unlucky").await?;
    let keyword = unique("couscous");

    let err = trigger_scraping(
        &state,
        &user,
        TriggerScrapingRequest {
            city: Some("Fes".into()),
            keyword: Some(keyword.clone()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let logs = logs_for(&state.pool, user.user_id, &keyword).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "failed");
    assert!(
        logs[0]
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("quota exceeded"))
    );
    Ok(())
}

#[tokio::test]
async fn unconfigured_webhook_fails_without_logging() -> anyhow::Result<()> {
    let Some(state) = db_state_with(|c| c.scraping_webhook_url = None).await? else {
        return Ok(());
    };
    let user = create_user(&state, "unconfigured").await?;
    let keyword = unique("pastilla");

    let err = trigger_scraping(
        &state,
        &user,
        TriggerScrapingRequest {
            city: Some("Rabat".into()),
            keyword: Some(keyword.clone()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
    assert!(logs_for(&state.pool, user.user_id, &keyword).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unwritable_success_row_is_logged_as_failed() -> anyhow::Result<()> {
    let base = spawn_stub(Router::new().route("/scrape", post(unstorable_workflow))).await;
    let Some(state) =
        db_state_with(|c| c.scraping_webhook_url = Some(format!("{base}/scrape"))).await?
    else {
        return Ok(());
    };
    let user = create_user(&state, "nul-sheet").await?;
    let keyword = unique("harira");

    let err = trigger_scraping(
        &state,
        &user,
        TriggerScrapingRequest {
            city: Some("Tangier".into()),
            keyword: Some(keyword.clone()),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let logs = logs_for(&state.pool, user.user_id, &keyword).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "failed");
    assert_eq!(logs[0].items_scraped, None);
    assert_eq!(logs[0].sheet_url, None);
    assert!(logs[0].error_message.is_some());
    Ok(())
}
