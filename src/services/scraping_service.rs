use crate::{
    audit::{ScrapingAttempt, log_scraping_attempt},
    dto::scraping::{
        ScrapingWebhookReply, ScrapingWebhookRequest, TriggerScrapingRequest,
        TriggerScrapingResponse,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::ScrapingStatus,
    response::ApiResponse,
    state::AppState,
};

/// Calls the scraping workflow and records the attempt, whatever its outcome.
pub async fn trigger_scraping(
    state: &AppState,
    user: &AuthUser,
    payload: TriggerScrapingRequest,
) -> AppResult<ApiResponse<TriggerScrapingResponse>> {
    let city = payload.city.as_deref().map(str::trim).unwrap_or_default();
    let keyword = payload.keyword.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() || keyword.is_empty() {
        return Err(AppError::Validation("City and keyword are required".into()));
    }

    let email: Option<(String,)> = sqlx::query_as("SELECT email FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&state.pool)
        .await?;
    let Some((user_email,)) = email else {
        return Err(AppError::not_found("User"));
    };

    let url = state.config.scraping_webhook_url.as_deref();
    if url.is_none() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "scraping webhook url is not configured"
        )));
    }

    let request = ScrapingWebhookRequest {
        city,
        keyword,
        user_email: &user_email,
    };
    let outcome = state
        .webhooks
        .post_json::<_, ScrapingWebhookReply>(url, &request)
        .await;

    let base = ScrapingAttempt {
        user_id: user.user_id,
        city,
        keyword,
        status: ScrapingStatus::Success,
        items_scraped: None,
        sheet_url: None,
        error_message: None,
    };

    match outcome {
        Ok(reply) => {
            let items_scraped = reply.items_scraped.unwrap_or(0);
            let attempt = ScrapingAttempt {
                items_scraped: Some(items_scraped),
                sheet_url: reply.sheet_url.as_deref(),
                ..base
            };
            if let Err(err) = log_scraping_attempt(&state.pool, &attempt).await {
                // the attempt still gets its one row, recorded as failed
                record_failure(state, base, &err.to_string()).await;
                return Err(err);
            }

            tracing::info!(
                user_id = user.user_id,
                city,
                keyword,
                items_scraped,
                "scraping triggered"
            );

            Ok(ApiResponse::success(
                "Scraping started",
                TriggerScrapingResponse {
                    sheet_url: reply.sheet_url.clone(),
                },
                None,
            ))
        }
        Err(err) => {
            record_failure(state, base, &err.to_string()).await;
            tracing::warn!(user_id = user.user_id, error = %err, "scraping webhook failed");
            Err(AppError::Upstream(err))
        }
    }
}

async fn record_failure(state: &AppState, base: ScrapingAttempt<'_>, message: &str) {
    let attempt = ScrapingAttempt {
        status: ScrapingStatus::Failed,
        items_scraped: None,
        sheet_url: None,
        error_message: Some(message),
        ..base
    };
    if let Err(log_err) = log_scraping_attempt(&state.pool, &attempt).await {
        tracing::warn!(error = %log_err, "scraping log failed");
    }
}
