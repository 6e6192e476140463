//! Token issuance: one exchange round trip against the trust service.
//!
//! [`TokenIssuer`] holds no shared mutable state; a single long-lived instance
//! called repeatedly and a fresh instance per call behave identically. It
//! performs no internal retry — retry and backoff belong to the refresh driver.

mod config;

use std::collections::HashMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use config::{DEFAULT_HTTP_TIMEOUT, DEFAULT_STS_ENDPOINT, DEFAULT_TOKEN_DURATION, IssuerConfig};

use crate::core::{ConfigError, Credentials, IssuerError, ObtainedToken, keys};

/// Header carrying the trust-service region on the exchange request
const STS_REGION_HEADER: &str = "x-sts-region";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AssumeRoleRequest<'a> {
    role_arn: &'a str,
    role_session_name: &'a str,
    duration_seconds: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumeRoleResponse {
    credentials: IssuedCredentials,
    expiration: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IssuedCredentials {
    access_key_id: String,
    secret_access_key: String,
    #[serde(default)]
    session_token: Option<String>,
}

/// Exchanges a long-lived identity for short-lived, scoped credentials.
#[derive(Debug)]
pub struct TokenIssuer {
    config: IssuerConfig,
    session_name: String,
    http: reqwest::Client,
}

impl TokenIssuer {
    /// Create an issuer, validating the configuration eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the missing or malformed field. This is
    /// fatal and non-retryable.
    pub fn new(config: IssuerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        // The session label lands in the trust service's audit trail; a random
        // suffix keeps concurrent processes distinguishable.
        let session_name = config
            .session_name
            .clone()
            .unwrap_or_else(|| format!("objstore-{}", Uuid::new_v4()));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "timeout".into(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            config,
            session_name,
            http,
        })
    }

    /// Session label used on every exchange request
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// Perform one token-exchange round trip for `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError`] wrapping the transport failure, service
    /// rejection, or undecodable response. The caller decides whether to
    /// retry.
    #[tracing::instrument(skip(self), fields(endpoint = %self.config.sts_endpoint))]
    pub async fn obtain(&self, scheme: &str) -> Result<ObtainedToken, IssuerError> {
        let request = AssumeRoleRequest {
            role_arn: &self.config.role_arn,
            role_session_name: &self.session_name,
            duration_seconds: self.config.duration.as_secs(),
        };

        // The exchange is only as trustworthy as the identity presented with
        // it: every request authenticates with the long-lived key pair.
        let response = self
            .http
            .post(&self.config.sts_endpoint)
            .basic_auth(&self.config.secret_id, Some(self.config.secret_key.expose()))
            .header(STS_REGION_HEADER, &self.config.sts_region)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(IssuerError::Service {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        let parsed: AssumeRoleResponse =
            serde_json::from_str(&body).map_err(|e| IssuerError::MalformedResponse {
                reason: e.to_string(),
            })?;

        let expiration_epoch_millis = DateTime::parse_from_rfc3339(&parsed.expiration)
            .map_err(|source| IssuerError::InvalidExpiration {
                value: parsed.expiration.clone(),
                source,
            })?
            .timestamp_millis();

        let credentials = Credentials::new(
            parsed.credentials.access_key_id,
            parsed.credentials.secret_access_key,
            parsed.credentials.session_token,
        );
        let payload = credentials
            .to_json()
            .map_err(|e| IssuerError::MalformedResponse {
                reason: e.to_string(),
            })?;

        let mut addition = HashMap::new();
        addition.insert(keys::BACKEND_REGION.to_string(), self.config.region.clone());

        tracing::debug!(
            access_key_id = %credentials.access_key_id,
            expiration_epoch_millis,
            "Obtained security token"
        );

        Ok(ObtainedToken::new(
            scheme,
            payload,
            expiration_epoch_millis,
            addition,
        ))
    }
}

/// Bound the service's error body before it reaches logs and error messages
fn truncate(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}
