use {
    crate::domain::{
        error::PipelineError,
        id::{OrderId, TransactionId},
        provider::{BoxFuture, TransactionResolver},
    },
    base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD},
    reqwest::{StatusCode, header},
    serde::Deserialize,
    std::time::Duration,
};

#[derive(Deserialize)]
struct TransactionResponse {
    transaction: TransactionBody,
}

#[derive(Deserialize)]
struct TransactionBody {
    #[serde(default)]
    notes: Notes,
}

#[derive(Default, Deserialize)]
struct Notes {
    #[serde(rename = "orderId")]
    order_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// BharatX merchant API client. Every request carries Basic credentials
/// built from the partner id and private key.
pub struct BharatXClient {
    base_url: String,
    authorization: String,
    client: reqwest::Client,
}

impl BharatXClient {
    pub fn new(
        base_url: &str,
        partner_id: &str,
        private_key: &str,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Config(format!("http client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: basic_authorization(partner_id, private_key),
            client,
        })
    }

    async fn fetch_order_id(&self, id: &TransactionId) -> Result<OrderId, PipelineError> {
        let url = format!("{}/merchant/transaction/{}", self.base_url, id.as_str());

        let resp = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, &self.authorization)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(PipelineError::Resolution {
                message,
                retryable: is_retryable_status(status),
            });
        }

        let bytes = resp.bytes().await.map_err(transport_error)?;
        let body: TransactionResponse =
            serde_json::from_slice(&bytes).map_err(|e| PipelineError::Resolution {
                message: format!("malformed transaction response: {e}"),
                retryable: false,
            })?;

        let order_id = body
            .transaction
            .notes
            .order_id
            .ok_or_else(|| PipelineError::Resolution {
                message: format!("transaction {id} has no orderId in notes"),
                retryable: false,
            })?;

        OrderId::new(order_id).map_err(|e| PipelineError::Resolution {
            message: e.to_string(),
            retryable: false,
        })
    }
}

impl TransactionResolver for BharatXClient {
    fn resolve_order_id<'a>(&'a self, id: &'a TransactionId) -> BoxFuture<'a, OrderId> {
        Box::pin(self.fetch_order_id(id))
    }
}

/// `Basic base64("{partner_id}:{private_key}")`.
pub fn basic_authorization(partner_id: &str, private_key: &str) -> String {
    let encoded = BASE64_STANDARD.encode(format!("{partner_id}:{private_key}"));
    format!("Basic {encoded}")
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn transport_error(e: reqwest::Error) -> PipelineError {
    let retryable = e.is_timeout() || e.is_connect() || e.is_request() || e.is_body();
    PipelineError::Resolution {
        message: e.to_string(),
        retryable,
    }
}
