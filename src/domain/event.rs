use {
    super::id::{OrderId, TransactionId},
    derive_more::Display,
    serde::Serialize,
};

/// Value of `QueueMessage.source`.
pub const SOURCE: &str = "bharatx";

/// Value of `DomainEvent.paymentMethodType`.
pub const PAYMENT_METHOD_TYPE: &str = "BHARATX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[display("ORDER_CONFIRMED")]
    OrderConfirmed,
}

/// What the mapper decided, before the order id is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTemplate {
    pub event_type: EventType,
}

impl EventTemplate {
    pub fn new(event_type: EventType) -> Self {
        Self { event_type }
    }

    pub fn into_event(self, order_id: OrderId, transaction_id: TransactionId) -> DomainEvent {
        DomainEvent {
            event: self.event_type,
            order_id,
            transaction_id,
            payment_method_type: PAYMENT_METHOD_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub event: EventType,
    pub order_id: OrderId,
    pub transaction_id: TransactionId,
    pub payment_method_type: &'static str,
}

/// Wire shape of every message put on the queue: `{ source, payload }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueMessage {
    pub source: &'static str,
    pub payload: DomainEvent,
}

impl QueueMessage {
    pub fn new(payload: DomainEvent) -> Self {
        Self {
            source: SOURCE,
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
