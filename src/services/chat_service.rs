use serde_json::Value;

use crate::{
    dto::chat::{ChatRequest, ChatWebhookRequest},
    error::{AppError, AppResult},
    state::AppState,
};

/// Relays a message to the chatbot workflow and hands back its reply untouched.
pub async fn send_message(state: &AppState, payload: ChatRequest) -> AppResult<Value> {
    let message = payload.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    let url = state.config.chat_webhook_url.as_deref();
    if url.is_none() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "chat webhook url is not configured"
        )));
    }

    let reply = state
        .webhooks
        .post_json::<_, Value>(url, &ChatWebhookRequest { message })
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "chat webhook failed"))?;

    Ok(reply)
}
