#![allow(dead_code)]

use bharatx_relay::domain::error::PipelineError;
use bharatx_relay::domain::event::QueueMessage;
use bharatx_relay::domain::id::{MessageId, OrderId, TransactionId};
use bharatx_relay::domain::notification::InboundWebhook;
use bharatx_relay::domain::provider::{BoxFuture, MessageDispatcher, TransactionResolver};
use bharatx_relay::services::authenticator::{AuthPolicy, Authenticator, webhook_digest};
use bharatx_relay::services::retry::RetryPolicy;
use bharatx_relay::services::webhook_pipeline::WebhookPipeline;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const PARTNER_ID: &str = "partner_abc";
pub const PRIVATE_KEY: &str = "sk_test_private";

// ── Fakes ──────────────────────────────────────────────────────────────────

/// Resolver that replays scripted results, then falls back to `default`.
pub struct FakeResolver {
    script: Mutex<VecDeque<Result<String, PipelineError>>>,
    default: String,
    calls: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn returning(order_id: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            default: order_id.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn scripted(script: Vec<Result<String, PipelineError>>, then: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            default: then.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: PipelineError) -> Arc<Self> {
        Self::scripted(vec![Err(err)], "unreachable")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TransactionResolver for FakeResolver {
    fn resolve_order_id<'a>(&'a self, id: &'a TransactionId) -> BoxFuture<'a, OrderId> {
        self.calls.lock().unwrap().push(id.as_str().to_string());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.default.clone()));
        Box::pin(async move { next.and_then(OrderId::new) })
    }
}

/// Dispatcher that records every publish attempt.
pub struct FakeDispatcher {
    failures: Mutex<VecDeque<PipelineError>>,
    attempts: Mutex<Vec<(serde_json::Value, Uuid)>>,
    published: Mutex<Vec<serde_json::Value>>,
}

impl FakeDispatcher {
    pub fn new() -> Arc<Self> {
        Self::failing_with(vec![])
    }

    /// Fails with each error in turn before accepting.
    pub fn failing_with(failures: Vec<PipelineError>) -> Arc<Self> {
        Arc::new(Self {
            failures: Mutex::new(failures.into()),
            attempts: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        })
    }

    pub fn published(&self) -> Vec<serde_json::Value> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<(serde_json::Value, Uuid)> {
        self.attempts.lock().unwrap().clone()
    }
}

impl MessageDispatcher for FakeDispatcher {
    fn publish<'a>(&'a self, message: &'a QueueMessage, dedup_key: Uuid) -> BoxFuture<'a, MessageId> {
        let body: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        self.attempts.lock().unwrap().push((body.clone(), dedup_key));

        let outcome = match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => {
                let mut published = self.published.lock().unwrap();
                published.push(body);
                Ok(MessageId::new(format!("msg-{}", published.len())))
            }
        };
        Box::pin(async move { outcome })
    }
}

// ── Builders ───────────────────────────────────────────────────────────────

pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

pub fn pipeline(
    policy: AuthPolicy,
    resolver: Arc<FakeResolver>,
    dispatcher: Arc<FakeDispatcher>,
) -> WebhookPipeline {
    pipeline_with_retry(policy, resolver, dispatcher, fast_retry(3))
}

pub fn pipeline_with_retry(
    policy: AuthPolicy,
    resolver: Arc<FakeResolver>,
    dispatcher: Arc<FakeDispatcher>,
    retry: RetryPolicy,
) -> WebhookPipeline {
    WebhookPipeline::new(
        Authenticator::new(PRIVATE_KEY, PARTNER_ID, policy),
        resolver,
        dispatcher,
        retry,
    )
}

pub fn body(transaction_id: &str, partner_id: &str, status: &str) -> String {
    serde_json::json!({
        "transaction": {
            "id": transaction_id,
            "partnerId": partner_id,
            "status": status,
            "notes": {"orderId": "ignored-by-relay"},
        }
    })
    .to_string()
}

pub fn signature(transaction_id: &str) -> String {
    webhook_digest(transaction_id, PRIVATE_KEY)
}

/// Correctly signed delivery from the configured partner.
pub fn signed_webhook(transaction_id: &str, status: &str) -> InboundWebhook {
    InboundWebhook::new(
        [("x-webhook-secret", signature(transaction_id))],
        body(transaction_id, PARTNER_ID, status),
    )
}

pub fn webhook(secret: Option<&str>, transaction_id: &str, partner_id: &str, status: &str) -> InboundWebhook {
    let headers: Vec<(&str, String)> = secret
        .map(|s| vec![("x-webhook-secret", s.to_string())])
        .unwrap_or_default();
    InboundWebhook::new(headers, body(transaction_id, partner_id, status))
}

pub fn retryable_resolution() -> PipelineError {
    PipelineError::Resolution {
        message: "HTTP 503".into(),
        retryable: true,
    }
}

pub fn retryable_dispatch() -> PipelineError {
    PipelineError::Dispatch {
        message: "service unavailable".into(),
        retryable: true,
    }
}
