//! Invite request gating: institutional-address validation and invitation
//! dispatch through the transactional mail provider.

pub mod domain;
pub mod mailer;
pub mod message;
pub mod policy;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{EmailAddress, EmailParseError, InviteReceipt, InviteSubmission};
pub use mailer::{InviteMailer, MailerError, OutboundEmail, ResendMailer};
pub use message::{render_invite_html, INVITE_SUBJECT};
pub use policy::DomainPolicy;
pub use router::invite_router;
pub use service::{ErrorDetailPolicy, InviteError, InviteService};
