use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::notification::InboundWebhook,
        services::webhook_pipeline::WebhookOutcome,
    },
    axum::{Json, extract::State, http::HeaderMap},
};

fn inbound_from_parts(headers: &HeaderMap, body: String) -> InboundWebhook {
    let pairs = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v.to_string())));
    InboundWebhook::new(pairs, body)
}

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(transaction_id = tracing::field::Empty, status = tracing::field::Empty)
)]
pub async fn bharatx_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let inbound = inbound_from_parts(&headers, body);

    match state.pipeline.process(&inbound).await? {
        WebhookOutcome::Dispatched { message_id } => Ok(Json(serde_json::json!({
            "status": "dispatched",
            "messageId": message_id,
        }))),
        WebhookOutcome::Skipped { status } => {
            tracing::info!(status = %status, "webhook skipped");
            Ok(Json(serde_json::Value::Null))
        }
    }
}
