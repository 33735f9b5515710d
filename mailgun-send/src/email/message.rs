//! Message value with fluent builder API

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{EmailError, ProviderMessage};

/// An attachment supplied as raw bytes plus a filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferAttachment {
    /// File name presented to the recipient
    pub filename: String,

    /// Raw content
    pub content: Vec<u8>,
}

impl BufferAttachment {
    /// Create a buffer attachment
    #[must_use]
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// A message to submit through [`MailSender`](super::MailSender)
///
/// Either build it with a struct literal or with the fluent methods:
///
/// ```rust
/// use mailgun_send::email::Message;
///
/// let message = Message::new()
///     .from("noreply@example.com")
///     .to("user@example.com")
///     .subject("Your invoice")
///     .text("Invoice attached.")
///     .buffer_attachment("invoice.txt", b"total: 42".to_vec());
/// ```
///
/// Path attachments are read by the provider client at send time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender (From)
    pub from: String,

    /// Recipient (To), passed to the provider as given
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Plain text body
    pub text: String,

    /// HTML body
    pub html: String,

    /// Files attached by path
    #[serde(default)]
    pub attachments: Vec<PathBuf>,

    /// Files attached inline by path
    #[serde(default)]
    pub inlines: Vec<PathBuf>,

    /// In-memory attachments
    #[serde(default)]
    pub buffer_attachments: Vec<BufferAttachment>,

    /// In-memory inline attachments
    #[serde(default)]
    pub buffer_inlines: Vec<BufferAttachment>,
}

impl Message {
    /// Create a new empty message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender
    #[must_use]
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = address.into();
        self
    }

    /// Set the recipient
    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = address.into();
        self
    }

    /// Set the subject line
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain text body
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = body.into();
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = body.into();
        self
    }

    /// Attach a file by path
    #[must_use]
    pub fn attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// Attach a file inline by path
    #[must_use]
    pub fn inline(mut self, path: impl Into<PathBuf>) -> Self {
        self.inlines.push(path.into());
        self
    }

    /// Attach in-memory content
    #[must_use]
    pub fn buffer_attachment(
        mut self,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.buffer_attachments
            .push(BufferAttachment::new(filename, content));
        self
    }

    /// Attach in-memory content inline
    #[must_use]
    pub fn buffer_inline(mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.buffer_inlines.push(BufferAttachment::new(filename, content));
        self
    }

    /// Total number of attachments across all four sequences
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
            + self.inlines.len()
            + self.buffer_attachments.len()
            + self.buffer_inlines.len()
    }

    /// Validate the message
    ///
    /// The only local check: at least one of `text` or `html` must be
    /// non-empty. Addresses and subject are passed through uninterpreted.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::EmptyBody` if both bodies are empty
    pub fn validate(&self) -> Result<(), EmailError> {
        if self.text.is_empty() && self.html.is_empty() {
            return Err(EmailError::EmptyBody);
        }

        Ok(())
    }

    /// Convert into the provider message that [`MailSender`](super::MailSender)
    /// submits
    ///
    /// DKIM is always on. An HTML body switches on open and click tracking;
    /// a text-only message leaves both unset. Each attachment sequence keeps
    /// its order.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::EmptyBody` if both bodies are empty
    pub fn into_provider_message(self) -> Result<ProviderMessage, EmailError> {
        self.validate()?;

        let Self {
            from,
            to,
            subject,
            text,
            html,
            attachments,
            inlines,
            buffer_attachments,
            buffer_inlines,
        } = self;

        let mut provider_message = ProviderMessage::new(from, subject, text, to);
        provider_message.set_dkim(true);

        if !html.is_empty() {
            provider_message.set_html(html);
            provider_message.set_tracking_opens(true);
            provider_message.set_tracking_clicks(true);
        }

        for path in attachments {
            provider_message.add_attachment(path);
        }
        for path in inlines {
            provider_message.add_inline(path);
        }
        for buffer in buffer_attachments {
            provider_message.add_buffer_attachment(buffer.filename, buffer.content);
        }
        for buffer in buffer_inlines {
            provider_message.add_buffer_inline(buffer.filename, buffer.content);
        }

        Ok(provider_message)
    }
}
