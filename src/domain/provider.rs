use {
    super::error::PipelineError,
    super::event::QueueMessage,
    super::id::{MessageId, OrderId, TransactionId},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PipelineError>> + Send + 'a>>;

/// Looks up the order id that checkout attached to a provider transaction.
pub trait TransactionResolver: Send + Sync {
    fn resolve_order_id<'a>(&'a self, id: &'a TransactionId) -> BoxFuture<'a, OrderId>;
}

/// Publishes a message to the downstream queue.
///
/// `dedup_key` identifies one logical publish: retries of the same publish
/// reuse it, separate webhook deliveries never share it.
pub trait MessageDispatcher: Send + Sync {
    fn publish<'a>(
        &'a self,
        message: &'a QueueMessage,
        dedup_key: Uuid,
    ) -> BoxFuture<'a, MessageId>;
}
