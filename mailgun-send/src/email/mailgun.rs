//! Mailgun HTTP API client
//!
//! Submits messages to the v3 `messages` endpoint as `multipart/form-data`.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{ProviderClient, ProviderError, ProviderMessage, SendResponse};
use crate::config::MailgunConfig;

/// Error body returned by Mailgun on non-success statuses
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Mailgun provider client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct MailgunClient {
    http: reqwest::Client,
    domain: String,
    api_key: String,
    api_base: String,
}

impl fmt::Debug for MailgunClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunClient")
            .field("domain", &self.domain)
            .field("api_key", &"[redacted]")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl MailgunClient {
    /// Create a client pinned to the configured API base
    ///
    /// The configuration is not validated here; see
    /// [`MailSender::new`](super::MailSender::new).
    #[must_use]
    pub fn from_config(config: &MailgunConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: &MailgunConfig) -> Self {
        Self {
            http,
            domain: config.domain.clone(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Sending domain
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// API base this client is pinned to
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether an API key is held (the key itself is never exposed)
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Full URL of the messages endpoint
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base, self.domain)
    }

    /// Build the multipart form for a message
    ///
    /// Path attachments are read from disk here.
    async fn build_form(message: ProviderMessage) -> Result<Form, ProviderError> {
        let mut form = Form::new()
            .text("from", message.from().to_string())
            .text("to", message.to().to_string())
            .text("subject", message.subject().to_string());

        if !message.text().is_empty() {
            form = form.text("text", message.text().to_string());
        }

        if let Some(html) = message.html() {
            form = form.text("html", html.to_string());
        }

        if let Some(dkim) = message.dkim() {
            form = form.text("o:dkim", yes_no(dkim));
        }
        if let Some(opens) = message.tracking_opens() {
            form = form.text("o:tracking-opens", yes_no(opens));
        }
        if let Some(clicks) = message.tracking_clicks() {
            form = form.text("o:tracking-clicks", yes_no(clicks));
        }

        for path in message.attachments() {
            form = form.part("attachment", file_part(path).await?);
        }
        for path in message.inlines() {
            form = form.part("inline", file_part(path).await?);
        }
        for buffer in message.buffer_attachments() {
            let part = Part::bytes(buffer.content.clone()).file_name(buffer.filename.clone());
            form = form.part("attachment", part);
        }
        for buffer in message.buffer_inlines() {
            let part = Part::bytes(buffer.content.clone()).file_name(buffer.filename.clone());
            form = form.part("inline", part);
        }

        Ok(form)
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

async fn file_part(path: &Path) -> Result<Part, ProviderError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| ProviderError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

    Ok(Part::bytes(content).file_name(file_name))
}

#[async_trait]
impl ProviderClient for MailgunClient {
    async fn send(&self, message: ProviderMessage) -> Result<SendResponse, ProviderError> {
        let form = Self::build_form(message).await?;

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |parsed| parsed.message);

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<SendResponse>().await?)
    }
}
