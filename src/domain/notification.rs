use {
    super::error::PipelineError,
    super::id::{PartnerId, TransactionId},
    serde::Deserialize,
    std::{collections::HashMap, fmt},
};

/// Header carrying the provider's `sha256("{txn_id}_{private_key}")` digest.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// One inbound delivery as received over HTTP. Header names are stored
/// lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct InboundWebhook {
    headers: HashMap<String, String>,
    raw_body: String,
}

impl InboundWebhook {
    pub fn new<I, K, V>(headers: I, raw_body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
            raw_body: raw_body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.header(WEBHOOK_SECRET_HEADER)
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }
}

/// Provider transaction status. Only `SUCCESS` is modelled; anything else is
/// kept verbatim so it can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TransactionStatus {
    Success,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUCCESS" => Self::Success,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct WebhookEnvelope {
    transaction: TransactionPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionPayload {
    id: String,
    partner_id: String,
    status: TransactionStatus,
    #[serde(default)]
    notes: serde_json::Value,
}

/// The `transaction` object of a webhook body, validated.
#[derive(Debug, Clone)]
pub struct TransactionNotification {
    pub transaction_id: TransactionId,
    pub partner_id: PartnerId,
    pub status: TransactionStatus,
    pub raw_notes: serde_json::Value,
}

impl TransactionNotification {
    pub fn parse(raw_body: &str) -> Result<Self, PipelineError> {
        let WebhookEnvelope { transaction } = serde_json::from_str(raw_body)?;

        Ok(Self {
            transaction_id: TransactionId::new(transaction.id)?,
            partner_id: PartnerId::new(transaction.partner_id)?,
            status: transaction.status,
            raw_notes: transaction.notes,
        })
    }
}
