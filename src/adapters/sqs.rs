use {
    crate::domain::{
        error::PipelineError,
        event::{QueueMessage, SOURCE},
        id::MessageId,
        provider::{BoxFuture, MessageDispatcher},
    },
    aws_config::{BehaviorVersion, Region, retry::RetryConfig, timeout::TimeoutConfig},
    aws_sdk_sqs::{
        Client,
        config::http::HttpResponse,
        error::{DisplayErrorContext, SdkError},
        operation::send_message::SendMessageError,
        types::MessageAttributeValue,
    },
    std::time::Duration,
    uuid::Uuid,
};

pub const DEDUP_KEY_ATTRIBUTE: &str = "dedupKey";

/// Publishes queue messages to a single SQS queue.
pub struct SqsDispatcher {
    client: Client,
    queue_url: String,
    fifo: bool,
}

impl SqsDispatcher {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        let queue_url = queue_url.into();
        Self {
            fifo: queue_url.ends_with(".fifo"),
            client,
            queue_url,
        }
    }

    /// Builds the SDK client from ambient AWS credentials. SDK-level retries
    /// are disabled; the pipeline's retry policy owns them.
    pub async fn connect(
        queue_url: &str,
        region: &str,
        endpoint_url: Option<&str>,
        timeout: Duration,
    ) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(RetryConfig::disabled())
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            .load()
            .await;

        let mut builder = aws_sdk_sqs::config::Builder::from(&shared);
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }

        Self::new(Client::from_conf(builder.build()), queue_url)
    }

    async fn send(&self, message: &QueueMessage, dedup_key: Uuid) -> Result<MessageId, PipelineError> {
        let body = message.to_json().map_err(|e| PipelineError::Dispatch {
            message: format!("serialize: {e}"),
            retryable: false,
        })?;
        let key = dedup_key.to_string();

        let attribute = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(&key)
            .build()
            .map_err(|e| PipelineError::Dispatch {
                message: format!("message attribute: {e}"),
                retryable: false,
            })?;

        let mut request = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .message_attributes(DEDUP_KEY_ATTRIBUTE, attribute);

        if self.fifo {
            request = request
                .message_group_id(SOURCE)
                .message_deduplication_id(&key);
        }

        let output = request.send().await.map_err(publish_error)?;

        output
            .message_id()
            .map(MessageId::new)
            .ok_or_else(|| PipelineError::Dispatch {
                message: "SQS returned no MessageId".into(),
                retryable: false,
            })
    }
}

impl MessageDispatcher for SqsDispatcher {
    fn publish<'a>(&'a self, message: &'a QueueMessage, dedup_key: Uuid) -> BoxFuture<'a, MessageId> {
        Box::pin(self.send(message, dedup_key))
    }
}

fn publish_error(e: SdkError<SendMessageError, HttpResponse>) -> PipelineError {
    let retryable = match &e {
        SdkError::ConstructionFailure(_) => false,
        SdkError::ServiceError(se) => {
            let status = se.raw().status();
            status.is_server_error() || status.as_u16() == 429
        }
        _ => true,
    };
    PipelineError::Dispatch {
        message: DisplayErrorContext(&e).to_string(),
        retryable,
    }
}
