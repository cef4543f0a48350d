use std::{sync::Arc, time::Duration};

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn},
    webhook::WebhookClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub webhooks: WebhookClient,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> anyhow::Result<Self> {
        let orm = create_orm_conn(&pool);
        let webhooks = WebhookClient::new(Duration::from_secs(config.webhook_timeout_secs))?;
        Ok(Self {
            pool,
            orm,
            config: Arc::new(config),
            webhooks,
        })
    }
}
