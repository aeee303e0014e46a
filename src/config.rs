use {
    crate::{domain::error::PipelineError, services::authenticator::AuthPolicy},
    std::{fmt, str::FromStr, time::Duration},
};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub partner_id: String,
    pub private_api_key: String,
    pub base_url: String,
    pub auth_policy: AuthPolicy,
    pub queue_url: String,
    pub aws_region: String,
    pub sqs_endpoint_url: Option<String>,
    pub http_timeout: Duration,
    pub retry_max_attempts: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| PipelineError::Config(format!("{key} must be set")))
        };

        Ok(Self {
            partner_id: required("BHARATX_PARTNER_ID")?,
            private_api_key: required("BHARATX_PRIVATE_API_KEY")?,
            base_url: required("BHARATX_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            auth_policy: parse_or(
                "BHARATX_AUTH_POLICY",
                get("BHARATX_AUTH_POLICY"),
                AuthPolicy::Strict,
            )?,
            queue_url: required("QUEUE_URL")?,
            aws_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            sqs_endpoint_url: get("SQS_ENDPOINT_URL"),
            http_timeout: Duration::from_millis(parse_or(
                "HTTP_TIMEOUT_MS",
                get("HTTP_TIMEOUT_MS"),
                5000,
            )?),
            retry_max_attempts: parse_or("RETRY_MAX_ATTEMPTS", get("RETRY_MAX_ATTEMPTS"), 3)?,
            retry_base_delay: Duration::from_millis(parse_or(
                "RETRY_BASE_DELAY_MS",
                get("RETRY_BASE_DELAY_MS"),
                100,
            )?),
            retry_max_delay: Duration::from_millis(parse_or(
                "RETRY_MAX_DELAY_MS",
                get("RETRY_MAX_DELAY_MS"),
                2000,
            )?),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, PipelineError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| PipelineError::Config(format!("{key}: invalid value {raw:?}: {e}"))),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("partner_id", &self.partner_id)
            .field("private_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("auth_policy", &self.auth_policy)
            .field("queue_url", &self.queue_url)
            .field("aws_region", &self.aws_region)
            .field("sqs_endpoint_url", &self.sqs_endpoint_url)
            .field("http_timeout", &self.http_timeout)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("retry_max_delay", &self.retry_max_delay)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
