//! Send a single message using credentials from the environment
//!
//! ```sh
//! MAILGUN_DOMAIN=mg.example.com MAILGUN_API_KEY=key-... \
//!     cargo run --example send_email -- user@example.com
//! ```

use mailgun_send::{observability, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init()?;

    let to = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: send_email <recipient>"))?;

    let config = MailgunConfig::from_env()?;
    let from = format!("noreply@{}", config.domain);
    let sender = MailSender::new(config)?;

    let message = Message::new()
        .from(from)
        .to(to)
        .subject("Hello from mailgun-send")
        .text("This is the plain text part.")
        .html("<h1>Hello</h1><p>This is the HTML part.</p>")
        .buffer_attachment("hello.txt", b"Hello, attachment!".to_vec());

    let id = sender.send(message).await?;
    tracing::info!(%id, "Message queued");

    Ok(())
}
