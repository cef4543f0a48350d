use std::env;

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_EXPIRES_IN_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    pub scraping_webhook_url: Option<String>,
    pub chat_webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());
        let jwt_expires_in_hours = token_lifetime_hours(env::var("JWT_EXPIRES_IN_HOURS").ok());
        let webhook_timeout_secs = env::var("WEBHOOK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);
        Ok(Self {
            port,
            database_url,
            host,
            environment,
            jwt_secret,
            jwt_expires_in_hours,
            scraping_webhook_url: non_empty_var("SCRAPING_WEBHOOK_URL"),
            chat_webhook_url: non_empty_var("CHAT_WEBHOOK_URL"),
            webhook_timeout_secs,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn token_lifetime_hours(raw: Option<String>) -> i64 {
    raw.and_then(|h| h.trim().parse::<i64>().ok())
        .filter(|h| (1..=MAX_JWT_EXPIRES_IN_HOURS).contains(h))
        .unwrap_or(24)
}
