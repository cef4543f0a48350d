use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Body forwarded to the chatbot webhook.
#[derive(Debug, Serialize)]
pub struct ChatWebhookRequest<'a> {
    pub message: &'a str,
}
