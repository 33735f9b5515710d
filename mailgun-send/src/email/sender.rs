//! Mail sender
//!
//! [`MailSender`] turns a [`Message`] into a
//! [`ProviderMessage`](super::ProviderMessage) under a fixed policy and
//! submits it through a [`ProviderClient`] with a hard deadline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::{EmailError, MailgunClient, Message, ProviderClient};
use crate::config::MailgunConfig;

/// Deadline for a single provider round trip
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends messages through a provider client
///
/// Holds no per-call state; clones share the same client handle and may be
/// used concurrently.
///
/// # Examples
///
/// ```rust,no_run
/// use mailgun_send::config::MailgunConfig;
/// use mailgun_send::email::{MailSender, Message};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = MailSender::new(MailgunConfig::new("mg.example.com", "key-0123"))?;
///
/// let id = sender
///     .send(
///         Message::new()
///             .from("noreply@mg.example.com")
///             .to("user@example.com")
///             .subject("Hello!")
///             .text("Hello, World!"),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MailSender<C = MailgunClient> {
    client: Arc<C>,
}

impl<C> Clone for MailSender<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl MailSender<MailgunClient> {
    /// Create a sender backed by Mailgun
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` if the domain or API key is empty
    pub fn new(config: MailgunConfig) -> Result<Self, EmailError> {
        config.validate()?;

        let client = MailgunClient::from_config(&config);
        debug!(
            domain = %client.domain(),
            api_base = %client.api_base(),
            "Mailgun sender initialised"
        );

        Ok(Self::with_client(client))
    }

    /// Create a sender from `MAILGUN_DOMAIN` and `MAILGUN_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` if either variable is missing or empty
    pub fn from_env() -> Result<Self, EmailError> {
        Self::new(MailgunConfig::from_env()?)
    }
}

impl<C: ProviderClient> MailSender<C> {
    /// Wrap an arbitrary provider client
    #[must_use]
    pub fn with_client(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The underlying provider client
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send a message and return the provider-assigned message id
    ///
    /// The provider call is cancelled if it has not completed within
    /// [`SEND_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// - `EmailError::EmptyBody` if both bodies are empty (nothing is sent)
    /// - `EmailError::Timeout` if the provider did not answer in time
    /// - `EmailError::Delivery` for any provider failure
    #[instrument(name = "mail.send", skip_all, fields(to = %message.to, subject = %message.subject))]
    pub async fn send(&self, message: Message) -> Result<String, EmailError> {
        let attachment_count = message.attachment_count();
        let has_html = !message.html.is_empty();
        let provider_message = message.into_provider_message()?;

        debug!(attachment_count, has_html, "Submitting message");

        let response = tokio::time::timeout(SEND_TIMEOUT, self.client.send(provider_message))
            .await
            .map_err(|_| EmailError::Timeout(SEND_TIMEOUT))??;

        info!(id = %response.id, "Message accepted");

        Ok(response.id)
    }

    /// Send a message given as positional arguments
    ///
    /// Shorthand for building a [`Message`] with path attachments only.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send)
    #[allow(clippy::too_many_arguments)]
    pub async fn send_message(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
        attachments: &[PathBuf],
        inlines: &[PathBuf],
    ) -> Result<String, EmailError> {
        let message = Message {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
            attachments: attachments.to_vec(),
            inlines: inlines.to_vec(),
            ..Message::default()
        };

        self.send(message).await
    }
}
