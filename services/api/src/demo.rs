use std::sync::Arc;

use clap::Args;
use invite_gate::config::DEFAULT_EVENT_LINK;
use invite_gate::error::AppError;
use invite_gate::invites::{DomainPolicy, ErrorDetailPolicy, InviteService, InviteSubmission};

use crate::infra::RecordingMailer;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Addresses to run through the gate (defaults to a built-in sample set)
    #[arg(long = "email")]
    pub(crate) emails: Vec<String>,
    /// Allowed domain suffix for the demo run
    #[arg(long, default_value = "stanford.edu")]
    pub(crate) allowed_domain: String,
}

/// Walk sample addresses through validation and dispatch against an
/// in-memory mailer; nothing leaves the process.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mailer = Arc::new(RecordingMailer::default());
    let policy = DomainPolicy::new(&args.allowed_domain);
    let service = InviteService::new(
        mailer.clone(),
        policy,
        DEFAULT_EVENT_LINK,
        ErrorDetailPolicy::Generic,
    );

    let emails = if args.emails.is_empty() {
        vec![
            "jane@stanford.edu".to_string(),
            "allen@alumni.stanford.edu".to_string(),
            "BOB@Stanford.EDU".to_string(),
            "mallory@gmail.com".to_string(),
            "spoof@notstanford.edu".to_string(),
        ]
    } else {
        args.emails
    };

    println!(
        "Invite gate demo (allowed domain: {})",
        service.policy().suffix()
    );

    for email in emails {
        match service.handle(InviteSubmission::from_email(email.clone())).await {
            Ok(receipt) => println!("  {email} -> invite queued for {}", receipt.recipient),
            Err(err) => println!("  {email} -> rejected: {err}"),
        }
    }

    println!(
        "{} message(s) captured by the in-memory mailer",
        mailer.outbox().len()
    );

    Ok(())
}
