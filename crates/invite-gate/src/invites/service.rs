use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{EmailAddress, InviteReceipt, InviteSubmission};
use super::mailer::{InviteMailer, MailerError, OutboundEmail};
use super::message::{render_invite_html, INVITE_SUBJECT};
use super::policy::DomainPolicy;

/// How much provider detail a dispatch failure exposes to the caller. The
/// full detail is always logged server-side either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDetailPolicy {
    #[default]
    Generic,
    Provider,
}

impl ErrorDetailPolicy {
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" => Some(Self::Generic),
            "provider" => Some(Self::Provider),
            _ => None,
        }
    }
}

/// Error raised by the invite handler. Display strings double as the
/// client-facing `error` payload.
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Email is required.")]
    MissingEmail,
    #[error("Access denied. Please use a valid {required} email.")]
    DomainDenied { required: String },
    #[error("{message}")]
    Dispatch { message: String },
}

/// Service composing the domain policy, invitation content, and the injected
/// mail provider. Stateless across requests; safe to share behind an `Arc`.
pub struct InviteService<M> {
    mailer: Arc<M>,
    policy: DomainPolicy,
    event_link: String,
    error_detail: ErrorDetailPolicy,
}

impl<M> InviteService<M>
where
    M: InviteMailer + 'static,
{
    pub fn new(
        mailer: Arc<M>,
        policy: DomainPolicy,
        event_link: impl Into<String>,
        error_detail: ErrorDetailPolicy,
    ) -> Self {
        Self {
            mailer,
            policy,
            event_link: event_link.into(),
            error_detail,
        }
    }

    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    /// Validate a submission and dispatch exactly one invitation email.
    /// Checks run in order and short-circuit; a rejected submission never
    /// reaches the provider, and a failed dispatch is never retried.
    pub async fn handle(&self, submission: InviteSubmission) -> Result<InviteReceipt, InviteError> {
        let Some(raw) = submission.email_str() else {
            warn!("submission missing a string email field");
            return Err(InviteError::MissingEmail);
        };

        let address = match EmailAddress::parse(raw) {
            Ok(address) if self.policy.allows(&address) => address,
            Ok(address) => {
                warn!(domain = address.domain(), "rejected address outside the allowed domain");
                return Err(self.domain_denied());
            }
            Err(reason) => {
                warn!(%reason, "rejected malformed address");
                return Err(self.domain_denied());
            }
        };

        let message = OutboundEmail {
            to: address.clone(),
            subject: INVITE_SUBJECT.to_string(),
            html_body: render_invite_html(&self.event_link),
        };

        match self.mailer.send(&message).await {
            Ok(()) => {
                info!(recipient = %address, "invite dispatched");
                Ok(InviteReceipt { recipient: address })
            }
            Err(source) => {
                error!(error = %source, recipient = %address, "invite dispatch failed");
                Err(InviteError::Dispatch {
                    message: self.dispatch_message(&source),
                })
            }
        }
    }

    fn domain_denied(&self) -> InviteError {
        InviteError::DomainDenied {
            required: self.policy.suffix().to_string(),
        }
    }

    fn dispatch_message(&self, source: &MailerError) -> String {
        match self.error_detail {
            ErrorDetailPolicy::Generic => "Failed to send invite email.".to_string(),
            ErrorDetailPolicy::Provider => format!("Failed to send email: {source}"),
        }
    }
}
