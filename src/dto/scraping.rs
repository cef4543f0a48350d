use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TriggerScrapingRequest {
    pub city: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriggerScrapingResponse {
    pub sheet_url: Option<String>,
}

/// Body posted to the scraping workflow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingWebhookRequest<'a> {
    pub city: &'a str,
    pub keyword: &'a str,
    pub user_email: &'a str,
}

/// What the workflow reports back; both fields are optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingWebhookReply {
    pub sheet_url: Option<String>,
    pub items_scraped: Option<i32>,
}
