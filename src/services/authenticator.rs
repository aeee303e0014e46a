use {
    crate::domain::{error::PipelineError, notification::TransactionNotification},
    sha2::{Digest, Sha256},
    std::{fmt, str::FromStr},
    subtle::ConstantTimeEq,
};

/// How the two webhook signals are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Digest and partner id must both match.
    #[default]
    Strict,
    /// Either signal is enough. Matches what the provider integration
    /// originally shipped with; a known partner id alone passes.
    Legacy,
}

impl FromStr for AuthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("expected `strict` or `legacy`, got `{other}`")),
        }
    }
}

impl fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// Lowercase hex `sha256("{transaction_id}_{private_key}")`.
pub fn webhook_digest(transaction_id: &str, private_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(transaction_id.as_bytes());
    hasher.update(b"_");
    hasher.update(private_key.as_bytes());
    hex::encode(hasher.finalize())
}

fn digest_matches(expected: &str, provided: Option<&str>) -> bool {
    match provided {
        Some(provided) => expected.as_bytes().ct_eq(provided.trim().as_bytes()).into(),
        None => false,
    }
}

pub fn authenticate(
    notification: &TransactionNotification,
    header_secret: Option<&str>,
    private_key: &str,
    partner_id: &str,
    policy: AuthPolicy,
) -> bool {
    let expected = webhook_digest(notification.transaction_id.as_str(), private_key);
    let secret_ok = digest_matches(&expected, header_secret);
    let partner_ok = notification.partner_id.as_str() == partner_id;

    match policy {
        AuthPolicy::Strict => secret_ok && partner_ok,
        AuthPolicy::Legacy => secret_ok || partner_ok,
    }
}

/// Holds the credentials the check needs so the pipeline doesn't thread
/// them through every call.
#[derive(Clone)]
pub struct Authenticator {
    private_key: String,
    partner_id: String,
    policy: AuthPolicy,
}

impl Authenticator {
    pub fn new(private_key: impl Into<String>, partner_id: impl Into<String>, policy: AuthPolicy) -> Self {
        Self {
            private_key: private_key.into(),
            partner_id: partner_id.into(),
            policy,
        }
    }

    pub fn verify(
        &self,
        notification: &TransactionNotification,
        header_secret: Option<&str>,
    ) -> Result<(), PipelineError> {
        if authenticate(
            notification,
            header_secret,
            &self.private_key,
            &self.partner_id,
            self.policy,
        ) {
            return Ok(());
        }

        let reason = if header_secret.is_none() {
            "missing webhook secret"
        } else {
            "webhook secret or partner id mismatch"
        };
        Err(PipelineError::Authentication(reason.into()))
    }
}
