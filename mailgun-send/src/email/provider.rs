//! Provider client boundary
//!
//! [`ProviderClient`] is the seam between [`MailSender`](super::MailSender)
//! and whatever actually talks to the delivery service. The sender builds a
//! [`ProviderMessage`], hands it over, and gets back a [`SendResponse`].

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::BufferAttachment;

/// Failures reported by a provider client
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider-supplied reason
        message: String,
    },

    /// A path attachment could not be read
    #[error("failed to read attachment {}: {source}", .path.display())]
    Attachment {
        /// Path as supplied by the caller
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Any other rejection from a provider
    #[error("provider rejected message: {0}")]
    Rejected(String),
}

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    /// Provider-assigned message identifier
    pub id: String,

    /// Human readable status, e.g. "Queued. Thank you."
    #[serde(default)]
    pub message: String,
}

/// Message object as submitted to a provider client
///
/// Flags are `None` until set; "not set" and "set to false" are
/// distinguishable so clients can omit unset options entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMessage {
    from: String,
    subject: String,
    text: String,
    to: String,
    html: Option<String>,
    dkim: Option<bool>,
    tracking_opens: Option<bool>,
    tracking_clicks: Option<bool>,
    attachments: Vec<PathBuf>,
    inlines: Vec<PathBuf>,
    buffer_attachments: Vec<BufferAttachment>,
    buffer_inlines: Vec<BufferAttachment>,
}

impl ProviderMessage {
    /// Create a message with the four base fields
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            text: text.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    /// Enable or disable DKIM signing
    pub fn set_dkim(&mut self, enabled: bool) {
        self.dkim = Some(enabled);
    }

    /// Set the HTML body
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = Some(html.into());
    }

    /// Enable or disable open tracking
    pub fn set_tracking_opens(&mut self, enabled: bool) {
        self.tracking_opens = Some(enabled);
    }

    /// Enable or disable click tracking
    pub fn set_tracking_clicks(&mut self, enabled: bool) {
        self.tracking_clicks = Some(enabled);
    }

    /// Append a path attachment
    pub fn add_attachment(&mut self, path: impl Into<PathBuf>) {
        self.attachments.push(path.into());
    }

    /// Append a path inline attachment
    pub fn add_inline(&mut self, path: impl Into<PathBuf>) {
        self.inlines.push(path.into());
    }

    /// Append a named in-memory attachment
    pub fn add_buffer_attachment(&mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.buffer_attachments
            .push(BufferAttachment::new(filename, content));
    }

    /// Append a named in-memory inline attachment
    pub fn add_buffer_inline(&mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.buffer_inlines.push(BufferAttachment::new(filename, content));
    }

    /// Sender
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Subject line
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain text body
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recipient
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// HTML body, if set
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// DKIM flag, if set
    #[must_use]
    pub const fn dkim(&self) -> Option<bool> {
        self.dkim
    }

    /// Open tracking flag, if set
    #[must_use]
    pub const fn tracking_opens(&self) -> Option<bool> {
        self.tracking_opens
    }

    /// Click tracking flag, if set
    #[must_use]
    pub const fn tracking_clicks(&self) -> Option<bool> {
        self.tracking_clicks
    }

    /// Path attachments in insertion order
    #[must_use]
    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    /// Path inline attachments in insertion order
    #[must_use]
    pub fn inlines(&self) -> &[PathBuf] {
        &self.inlines
    }

    /// In-memory attachments in insertion order
    #[must_use]
    pub fn buffer_attachments(&self) -> &[BufferAttachment] {
        &self.buffer_attachments
    }

    /// In-memory inline attachments in insertion order
    #[must_use]
    pub fn buffer_inlines(&self) -> &[BufferAttachment] {
        &self.buffer_inlines
    }
}

/// A client able to submit messages to a delivery provider
///
/// Implementations own authentication, transport and connection reuse.
/// The caller applies its own deadline around [`send`](Self::send); dropping
/// the returned future must abort the request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Submit a message and return the provider's acknowledgement
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider rejects the message or
    /// cannot be reached
    async fn send(&self, message: ProviderMessage) -> Result<SendResponse, ProviderError>;
}
