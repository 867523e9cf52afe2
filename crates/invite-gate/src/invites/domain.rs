use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Raw body of a verify request. `email` is kept as a JSON value so a missing
/// field and a non-string field are both reported as the same client error
/// instead of an opaque deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InviteSubmission {
    #[serde(default)]
    pub email: Option<Value>,
}

impl InviteSubmission {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(Value::String(email.into())),
        }
    }

    pub fn email_str(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }
}

/// A structurally valid address: exactly one `@`, non-empty local part and
/// domain. Submitted casing is preserved so the provider sees the address as
/// the requester typed it; comparisons happen case-insensitively in the
/// domain policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, EmailParseError> {
        let candidate = raw.trim();
        if candidate.matches('@').count() != 1 {
            return Err(EmailParseError::AtSignCount);
        }

        let (local, domain) = candidate
            .split_once('@')
            .ok_or(EmailParseError::AtSignCount)?;
        if local.is_empty() {
            return Err(EmailParseError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailParseError::EmptyDomain);
        }

        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`.
    pub fn domain(&self) -> &str {
        self.0
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailParseError {
    #[error("address must contain exactly one '@'")]
    AtSignCount,
    #[error("address is missing the part before '@'")]
    EmptyLocalPart,
    #[error("address is missing the domain after '@'")]
    EmptyDomain,
}

/// Confirmation that an invitation was handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteReceipt {
    pub recipient: EmailAddress,
}
