//! Webhook error types.

use thiserror::Error;

/// Errors that can stop the conversion webhook from starting or serving.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
