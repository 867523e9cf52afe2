//! Invite-gating core: validates that a requester's email address belongs to
//! an allow-listed institutional domain and, on success, dispatches a
//! single invitation email carrying the event link.

pub mod config;
pub mod error;
pub mod invites;
pub mod telemetry;
