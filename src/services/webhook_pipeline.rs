use {
    super::{authenticator::Authenticator, event_mapper::map_status, retry::RetryPolicy},
    crate::domain::{
        error::PipelineError,
        event::QueueMessage,
        id::MessageId,
        notification::{InboundWebhook, TransactionNotification, TransactionStatus},
        provider::{MessageDispatcher, TransactionResolver},
    },
    std::sync::Arc,
    uuid::Uuid,
};

/// Terminal state of one webhook run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Authenticated, but the status maps to no event.
    Skipped { status: TransactionStatus },
    /// An event was published to the queue.
    Dispatched { message_id: MessageId },
}

/// Authenticate → map → resolve → publish, once per inbound call.
/// Holds only read-only collaborators and can be shared between requests.
pub struct WebhookPipeline {
    authenticator: Authenticator,
    resolver: Arc<dyn TransactionResolver>,
    dispatcher: Arc<dyn MessageDispatcher>,
    retry: RetryPolicy,
}

impl WebhookPipeline {
    pub fn new(
        authenticator: Authenticator,
        resolver: Arc<dyn TransactionResolver>,
        dispatcher: Arc<dyn MessageDispatcher>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            authenticator,
            resolver,
            dispatcher,
            retry,
        }
    }

    pub async fn process(&self, inbound: &InboundWebhook) -> Result<WebhookOutcome, PipelineError> {
        let notification = TransactionNotification::parse(inbound.raw_body())?;

        tracing::Span::current()
            .record("transaction_id", tracing::field::display(&notification.transaction_id))
            .record("status", tracing::field::display(&notification.status));

        self.authenticator
            .verify(&notification, inbound.webhook_secret())?;

        let Some(template) = map_status(&notification.status) else {
            tracing::info!("status produces no event, skipping");
            return Ok(WebhookOutcome::Skipped {
                status: notification.status,
            });
        };

        let transaction_id = &notification.transaction_id;
        let order_id = self
            .retry
            .run("resolve_order_id", || self.resolver.resolve_order_id(transaction_id))
            .await
            .map_err(|e| match e {
                e @ PipelineError::Resolution { .. } => e,
                other => PipelineError::Resolution {
                    message: other.to_string(),
                    retryable: false,
                },
            })?;

        let message = QueueMessage::new(template.into_event(order_id, transaction_id.clone()));

        // One key per delivery, shared by every retry of this publish.
        let dedup_key = Uuid::now_v7();
        let message_id = self
            .retry
            .run("publish", || self.dispatcher.publish(&message, dedup_key))
            .await?;

        tracing::info!(
            message_id = %message_id,
            order_id = %message.payload.order_id,
            event = %message.payload.event,
            "event dispatched"
        );
        Ok(WebhookOutcome::Dispatched { message_id })
    }
}
