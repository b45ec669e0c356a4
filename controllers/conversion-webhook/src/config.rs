//! Webhook configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::WebhookError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9443";

/// Certificate and key files for serving HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// `WEBHOOK_BIND_ADDRESS`
    pub bind_address: SocketAddr,
    /// `WEBHOOK_TLS_CERT_FILE` and `WEBHOOK_TLS_KEY_FILE`; plain HTTP when unset
    pub tls: Option<TlsFiles>,
}

impl WebhookConfig {
    pub fn from_env() -> Result<Self, WebhookError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WebhookError> {
        let bind_address = lookup("WEBHOOK_BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address.parse().map_err(|_| {
            WebhookError::InvalidConfig(format!(
                "WEBHOOK_BIND_ADDRESS is not a socket address: {bind_address}"
            ))
        })?;

        let tls = match (lookup("WEBHOOK_TLS_CERT_FILE"), lookup("WEBHOOK_TLS_KEY_FILE")) {
            (Some(cert_file), Some(key_file)) => Some(TlsFiles {
                cert_file: cert_file.into(),
                key_file: key_file.into(),
            }),
            (None, None) => None,
            _ => {
                return Err(WebhookError::InvalidConfig(
                    "WEBHOOK_TLS_CERT_FILE and WEBHOOK_TLS_KEY_FILE must be set together"
                        .to_string(),
                ));
            }
        };

        Ok(Self { bind_address, tls })
    }
}
