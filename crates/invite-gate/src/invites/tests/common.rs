use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::invites::domain::InviteSubmission;
use crate::invites::mailer::{InviteMailer, MailerError, OutboundEmail};
use crate::invites::policy::DomainPolicy;
use crate::invites::router::invite_router;
use crate::invites::service::{ErrorDetailPolicy, InviteService};

pub(super) const EVENT_LINK: &str = "https://partiful.com/e/O7quZS46xjzssWIWb5b8";

/// Records every send attempt; optionally scripted to fail with a provider
/// rejection so dispatch-failure paths can be exercised offline.
#[derive(Default)]
pub(super) struct RecordingMailer {
    calls: Mutex<Vec<OutboundEmail>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub(super) fn failing(detail: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(detail.to_string()),
        }
    }

    pub(super) fn calls(&self) -> Vec<OutboundEmail> {
        self.calls.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl InviteMailer for RecordingMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        self.calls
            .lock()
            .expect("mailer mutex poisoned")
            .push(message.clone());

        match &self.fail_with {
            Some(detail) => Err(MailerError::Rejected {
                status: 500,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub(super) fn build_service(mailer: Arc<RecordingMailer>) -> InviteService<RecordingMailer> {
    InviteService::new(
        mailer,
        DomainPolicy::default(),
        EVENT_LINK,
        ErrorDetailPolicy::Generic,
    )
}

pub(super) fn build_router(mailer: Arc<RecordingMailer>) -> axum::Router {
    invite_router(Arc::new(build_service(mailer)))
}

pub(super) fn submission(email: &str) -> InviteSubmission {
    InviteSubmission::from_email(email)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
