use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::domain::EmailAddress;
use crate::config::MailConfig;

pub const RESEND_API_BASE: &str = "https://api.resend.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fully rendered message handed to the provider seam. Sender identity is
/// not part of the message; the concrete mailer supplies it from server
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected the message ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// Outbound mail capability, injected into the invite service so tests can
/// substitute a recording fake without network access.
#[async_trait]
pub trait InviteMailer: Send + Sync {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError>;
}

/// Resend-backed mailer. The underlying client enforces a connect timeout and
/// a bounded total timeout on every send so a slow provider cannot hang a
/// request indefinitely.
#[derive(Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    sender: String,
    reply_to: Option<String>,
}

impl ResendMailer {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        sender: impl Into<String>,
        reply_to: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            sender: sender.into(),
            reply_to,
        }
    }

    pub fn from_config(config: &MailConfig) -> Result<Self, MailerError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::new(
            http,
            RESEND_API_BASE,
            config.api_key.clone(),
            config.sender.clone(),
            config.reply_to.clone(),
        ))
    }

    fn payload(&self, message: &OutboundEmail) -> serde_json::Value {
        let mut payload = json!({
            "from": self.sender,
            "to": [message.to.as_str()],
            "subject": message.subject,
            "html": message.html_body,
        });
        if let Some(reply_to) = &self.reply_to {
            payload["reply_to"] = json!(reply_to);
        }
        payload
    }
}

impl fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendMailer")
            .field("base_url", &self.base_url)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl InviteMailer for ResendMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        let url = format!("{}/emails", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());
        Err(MailerError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
