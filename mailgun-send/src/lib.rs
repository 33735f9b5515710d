//! mailgun-send: transactional email through the Mailgun HTTP API
//!
//! A small wrapper that turns a [`Message`](email::Message) into a Mailgun
//! submission with a fixed sending policy:
//!
//! - DKIM signing is always enabled
//! - Open and click tracking are enabled whenever an HTML body is present
//! - Every submission is bounded by a 30 second deadline
//!
//! Delivery, authentication and transport belong to the provider client
//! behind the [`ProviderClient`](email::ProviderClient) trait.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailgun_send::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads MAILGUN_DOMAIN and MAILGUN_API_KEY
//!     let sender = MailSender::from_env()?;
//!
//!     let message = Message::new()
//!         .from("noreply@example.com")
//!         .to("user@example.com")
//!         .subject("Welcome!")
//!         .text("Thanks for signing up.")
//!         .html("<p>Thanks for signing up.</p>");
//!
//!     let id = sender.send(message).await?;
//!     tracing::info!(%id, "queued");
//!     Ok(())
//! }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
// Additional crate-specific allows:
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod email;
pub mod observability;
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use mailgun_send::prelude::*;
    //! ```

    pub use crate::config::MailgunConfig;
    pub use crate::email::{
        BufferAttachment, EmailError, MailSender, MailgunClient, Message, ProviderClient,
        ProviderError, ProviderMessage, SendResponse, SEND_TIMEOUT,
    };
}
