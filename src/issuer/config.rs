//! Issuer configuration and validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{ConfigError, SecretString};

/// Default trust-service endpoint
pub const DEFAULT_STS_ENDPOINT: &str = "https://sts.tencentcloudapi.com";

/// Default requested token validity
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::from_secs(3600);

/// Default HTTP timeout for the exchange round trip
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`TokenIssuer`](super::TokenIssuer).
///
/// Every required field is checked eagerly at construction; a missing value is
/// a fatal [`ConfigError::MissingRequired`] naming the field, never a deferred
/// failure at first use.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Long-lived identity id used to authenticate against the trust service
    pub secret_id: String,

    /// Long-lived identity secret; wiped on drop, redacted from `Debug`
    pub secret_key: SecretString,

    /// Role/resource identifier the temporary credentials are scoped to
    pub role_arn: String,

    /// Trust-service endpoint (defaults to [`DEFAULT_STS_ENDPOINT`])
    pub sts_endpoint: String,

    /// Region of the trust service
    pub sts_region: String,

    /// Region of the target storage backend, forwarded to the storage client
    /// through the token's attribute map
    pub region: String,

    /// Requested token validity (default 1 hour)
    #[serde(with = "humantime_serde")]
    pub duration: Duration,

    /// HTTP timeout for the exchange round trip (default 10 seconds)
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Session label recorded in the service's audit trail; auto-generated
    /// when absent
    pub session_name: Option<String>,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: SecretString::default(),
            role_arn: String::new(),
            sts_endpoint: DEFAULT_STS_ENDPOINT.into(),
            sts_region: String::new(),
            region: String::new(),
            duration: DEFAULT_TOKEN_DURATION,
            timeout: DEFAULT_HTTP_TIMEOUT,
            session_name: None,
        }
    }
}

impl IssuerConfig {
    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("secret_id", self.secret_id.as_str()),
            ("secret_key", self.secret_key.expose()),
            ("role_arn", self.role_arn.as_str()),
            ("sts_region", self.sts_region.as_str()),
            ("region", self.region.as_str()),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: field.into(),
                });
            }
        }

        if self.sts_endpoint.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "sts_endpoint".into(),
            });
        }
        Url::parse(&self.sts_endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "sts_endpoint".into(),
            reason: e.to_string(),
        })?;

        // Matches the validity range the trust service accepts.
        let duration_secs = self.duration.as_secs();
        if !(60..=43_200).contains(&duration_secs) {
            return Err(ConfigError::InvalidValue {
                field: "duration".into(),
                reason: format!(
                    "must be between 60 seconds and 12 hours, got {} seconds",
                    duration_secs
                ),
            });
        }

        let timeout_secs = self.timeout.as_secs();
        if !(1..=60).contains(&timeout_secs) {
            return Err(ConfigError::InvalidValue {
                field: "timeout".into(),
                reason: format!("must be between 1 and 60 seconds, got {} seconds", timeout_secs),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for IssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &self.secret_key)
            .field("role_arn", &self.role_arn)
            .field("sts_endpoint", &self.sts_endpoint)
            .field("sts_region", &self.sts_region)
            .field("region", &self.region)
            .field("duration", &self.duration)
            .field("timeout", &self.timeout)
            .field("session_name", &self.session_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> IssuerConfig {
        IssuerConfig {
            secret_id: "AKIDlonglived".into(),
            secret_key: "longlivedsecret".into(),
            role_arn: "qcs::cam::uin/100000:roleName/ingest".into(),
            sts_region: "ap-guangzhou".into(),
            region: "ap-guangzhou".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_endpoint_defaults() {
        assert_eq!(valid_config().sts_endpoint, DEFAULT_STS_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = IssuerConfig {
            sts_endpoint: "not a url".into(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "sts_endpoint"
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = IssuerConfig {
            duration: Duration::ZERO,
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "duration"
        ));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let debug = format!("{:?}", valid_config());
        assert!(!debug.contains("longlivedsecret"));
        assert!(debug.contains("AKIDlonglived"));
    }
}
