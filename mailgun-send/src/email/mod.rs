//! Message submission through a provider client
//!
//! This module provides:
//! - [`Message`]: the caller-facing message value and builder
//! - [`MailSender`]: fixed policy (DKIM always, tracking with HTML) and a
//!   30 second deadline around every submission
//! - [`ProviderClient`]: the seam to the delivery service, with
//!   [`MailgunClient`] as the production implementation
//!
//! # Examples
//!
//! ## Sending with attachments
//!
//! ```rust,no_run
//! use mailgun_send::config::MailgunConfig;
//! use mailgun_send::email::{MailSender, Message};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sender = MailSender::new(MailgunConfig::new("mg.example.com", "key-0123"))?;
//!
//! let message = Message::new()
//!     .from("billing@mg.example.com")
//!     .to("customer@example.com")
//!     .subject("Your invoice")
//!     .html("<p>Invoice attached.</p><img src=\"cid:logo.png\">")
//!     .attachment("/var/invoices/2024-001.pdf")
//!     .inline("/srv/assets/logo.png")
//!     .buffer_attachment("summary.csv", b"total,42\n".to_vec());
//!
//! let id = sender.send(message).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod mailgun;
mod message;
mod provider;
mod sender;

pub use error::EmailError;
pub use mailgun::MailgunClient;
pub use message::{BufferAttachment, Message};
pub use provider::{ProviderClient, ProviderError, ProviderMessage, SendResponse};
pub use sender::{MailSender, SEND_TIMEOUT};

#[cfg(test)]
pub use provider::MockProviderClient;
