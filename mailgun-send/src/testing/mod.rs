//! Testing utilities
//!
//! [`RecordingClient`] is an in-memory [`ProviderClient`] that captures every
//! submitted [`ProviderMessage`] for assertions. It can also simulate a slow
//! or failing provider.
//!
//! ```rust
//! use mailgun_send::email::{MailSender, Message};
//! use mailgun_send::testing::RecordingClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RecordingClient::new();
//! let sender = MailSender::with_client(client.clone());
//!
//! sender
//!     .send(Message::new().from("a@example.com").to("b@example.com").text("hi"))
//!     .await?;
//!
//! assert_eq!(client.sent_count(), 1);
//! assert_eq!(client.last_sent().unwrap().dkim(), Some(true));
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::email::{ProviderClient, ProviderError, ProviderMessage, SendResponse};

/// How the recording client answers
#[derive(Debug, Clone, Default)]
enum Outcome {
    #[default]
    Accept,
    Reject(String),
}

/// In-memory provider client for tests
///
/// Clones share the same record, so a clone can be handed to a
/// [`MailSender`](crate::email::MailSender) while the original is kept for
/// assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    sent: Arc<Mutex<Vec<ProviderMessage>>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
    outcome: Outcome,
}

impl RecordingClient {
    /// Create a client that accepts every message immediately
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait `delay` before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject every message with `reason`
    #[must_use]
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.outcome = Outcome::Reject(reason.into());
        self
    }

    /// Number of times `send` was invoked, including rejected calls
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of messages accepted
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// All accepted messages, in submission order
    #[must_use]
    pub fn sent_messages(&self) -> Vec<ProviderMessage> {
        self.sent.lock().clone()
    }

    /// The most recently accepted message
    #[must_use]
    pub fn last_sent(&self) -> Option<ProviderMessage> {
        self.sent.lock().last().cloned()
    }

    /// Clear the record
    pub fn clear(&self) {
        self.sent.lock().clear();
        self.calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProviderClient for RecordingClient {
    async fn send(&self, message: ProviderMessage) -> Result<SendResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Reject(reason) => Err(ProviderError::Rejected(reason.clone())),
            Outcome::Accept => {
                self.sent.lock().push(message);
                Ok(SendResponse {
                    id: format!("<recorded.{call}@localhost>"),
                    message: "Queued. Thank you.".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(subject: &str) -> ProviderMessage {
        ProviderMessage::new("a@example.com", subject, "hello", "b@example.com")
    }

    #[tokio::test]
    async fn test_records_messages() {
        let client = RecordingClient::new();

        let first = client.send(message("First")).await.unwrap();
        let second = client.send(message("Second")).await.unwrap();

        assert_eq!(first.id, "<recorded.1@localhost>");
        assert_eq!(second.id, "<recorded.2@localhost>");
        assert_eq!(client.sent_count(), 2);
        assert_eq!(client.last_sent().unwrap().subject(), "Second");
        assert_eq!(client.sent_messages()[0].subject(), "First");
    }

    #[tokio::test]
    async fn test_clones_share_record() {
        let client = RecordingClient::new();
        let clone = client.clone();

        clone.send(message("Shared")).await.unwrap();

        assert_eq!(client.sent_count(), 1);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejecting() {
        let client = RecordingClient::new().rejecting("quota exceeded");

        let result = client.send(message("Nope")).await;

        assert!(matches!(result, Err(ProviderError::Rejected(ref r)) if r == "quota exceeded"));
        assert_eq!(client.calls(), 1);
        assert_eq!(client.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let client = RecordingClient::new();
        client.send(message("Gone")).await.unwrap();

        client.clear();

        assert_eq!(client.sent_count(), 0);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let client = RecordingClient::new().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        client.send(message("Slow")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
