use std::sync::Arc;

use serde_json::json;

use super::common::{build_service, submission, RecordingMailer, EVENT_LINK};
use crate::invites::domain::InviteSubmission;
use crate::invites::message::INVITE_SUBJECT;
use crate::invites::policy::DomainPolicy;
use crate::invites::service::{ErrorDetailPolicy, InviteError, InviteService};

#[tokio::test]
async fn missing_email_is_rejected_without_a_provider_call() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    let err = service
        .handle(InviteSubmission::default())
        .await
        .expect_err("missing email rejected");

    assert!(matches!(err, InviteError::MissingEmail));
    assert_eq!(err.to_string(), "Email is required.");
    assert!(mailer.calls().is_empty());
}

#[tokio::test]
async fn non_string_email_is_rejected_without_a_provider_call() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    let err = service
        .handle(InviteSubmission {
            email: Some(json!(42)),
        })
        .await
        .expect_err("non-string email rejected");

    assert!(matches!(err, InviteError::MissingEmail));
    assert!(mailer.calls().is_empty());
}

#[tokio::test]
async fn foreign_domain_is_denied_without_a_provider_call() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    let err = service
        .handle(submission("bob@mit.edu"))
        .await
        .expect_err("foreign domain denied");

    assert_eq!(
        err.to_string(),
        "Access denied. Please use a valid stanford.edu email."
    );
    assert!(mailer.calls().is_empty());
}

#[tokio::test]
async fn address_without_at_sign_is_denied() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    let err = service
        .handle(submission("notstanford.edu"))
        .await
        .expect_err("malformed address denied");

    assert!(matches!(err, InviteError::DomainDenied { .. }));
    assert!(mailer.calls().is_empty());
}

#[tokio::test]
async fn accepted_address_dispatches_exactly_one_invite() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    let receipt = service
        .handle(submission("bob@stanford.edu"))
        .await
        .expect("invite dispatched");

    assert_eq!(receipt.recipient.as_str(), "bob@stanford.edu");

    let calls = mailer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to.as_str(), "bob@stanford.edu");
    assert_eq!(calls[0].subject, INVITE_SUBJECT);
    assert!(calls[0].html_body.contains(EVENT_LINK));
}

#[tokio::test]
async fn uppercase_address_is_accepted_and_casing_preserved() {
    let mailer = Arc::new(RecordingMailer::default());
    let service = build_service(mailer.clone());

    service
        .handle(submission("BOB@Stanford.EDU"))
        .await
        .expect("uppercase address accepted");

    let calls = mailer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to.as_str(), "BOB@Stanford.EDU");
}

#[tokio::test]
async fn provider_failure_surfaces_a_generic_message_without_retry() {
    let mailer = Arc::new(RecordingMailer::failing("quota exceeded"));
    let service = build_service(mailer.clone());

    let err = service
        .handle(submission("bob@alumni.stanford.edu"))
        .await
        .expect_err("dispatch failure surfaced");

    assert_eq!(err.to_string(), "Failed to send invite email.");
    assert_eq!(mailer.calls().len(), 1, "no retry after a failed send");
}

#[tokio::test]
async fn provider_detail_policy_echoes_the_underlying_error() {
    let mailer = Arc::new(RecordingMailer::failing("quota exceeded"));
    let service = InviteService::new(
        mailer.clone(),
        DomainPolicy::default(),
        EVENT_LINK,
        ErrorDetailPolicy::Provider,
    );

    let err = service
        .handle(submission("bob@stanford.edu"))
        .await
        .expect_err("dispatch failure surfaced");

    let rendered = err.to_string();
    assert!(rendered.starts_with("Failed to send email:"));
    assert!(rendered.contains("quota exceeded"));
    assert_eq!(mailer.calls().len(), 1);
}
