use crate::domain::{
    event::{EventTemplate, EventType},
    notification::TransactionStatus,
};

/// Decide which event, if any, a provider status produces.
///
/// Only a successful payment confirms an order. Failed or pending
/// transactions produce nothing; the order simply stays unconfirmed.
pub fn map_status(status: &TransactionStatus) -> Option<EventTemplate> {
    match status {
        TransactionStatus::Success => Some(EventTemplate::new(EventType::OrderConfirmed)),
        TransactionStatus::Other(_) => None,
    }
}
