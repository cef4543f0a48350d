use crate::{db::DbPool, error::AppResult, models::ScrapingStatus};

/// One scraping attempt, as written to the append-only `scraping_logs` table.
#[derive(Debug, Clone, Copy)]
pub struct ScrapingAttempt<'a> {
    pub user_id: i64,
    pub city: &'a str,
    pub keyword: &'a str,
    pub status: ScrapingStatus,
    pub items_scraped: Option<i32>,
    pub sheet_url: Option<&'a str>,
    pub error_message: Option<&'a str>,
}

pub async fn log_scraping_attempt(pool: &DbPool, attempt: &ScrapingAttempt<'_>) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO scraping_logs
            (user_id, city, keyword, status, items_scraped, sheet_url, error_message)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(attempt.user_id)
    .bind(attempt.city)
    .bind(attempt.keyword)
    .bind(attempt.status.as_str())
    .bind(attempt.items_scraped)
    .bind(attempt.sheet_url)
    .bind(attempt.error_message)
    .execute(pool)
    .await?;

    Ok(())
}
