//! Email error types

use std::time::Duration;

use thiserror::Error;

use super::ProviderError;

/// Errors returned by [`MailSender`](super::MailSender)
#[derive(Debug, Error)]
pub enum EmailError {
    /// Required credentials are missing or empty, or the configuration
    /// source could not be read
    #[error("email configuration error: {0}")]
    Config(String),

    /// Message has neither a text nor an HTML body
    #[error("empty text and html mail body")]
    EmptyBody,

    /// The provider did not answer within the send deadline
    #[error("provider call did not complete within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The provider client reported a failure
    #[error("delivery failed: {0}")]
    Delivery(#[from] ProviderError),
}

impl EmailError {
    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}

impl From<figment::Error> for EmailError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
