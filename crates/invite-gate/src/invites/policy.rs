use super::domain::EmailAddress;

const DEFAULT_SUFFIX: &str = "stanford.edu";

/// The single allow-list predicate for institutional addresses: the domain
/// part must equal the configured suffix or end with `.<suffix>`, compared
/// case-insensitively. A bare string without `@` never reaches this check;
/// it already fails address parsing.
#[derive(Debug, Clone)]
pub struct DomainPolicy {
    suffix: String,
}

impl DomainPolicy {
    /// Build a policy from a configured suffix. Leading `@` or `.` characters
    /// and surrounding whitespace are stripped; an empty value falls back to
    /// the default suffix.
    pub fn new(suffix: &str) -> Self {
        let sanitized = suffix
            .trim()
            .trim_start_matches(['@', '.'])
            .to_ascii_lowercase();

        let suffix = if sanitized.is_empty() {
            DEFAULT_SUFFIX.to_string()
        } else {
            sanitized
        };

        Self { suffix }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn allows(&self, address: &EmailAddress) -> bool {
        let domain = address.domain().to_ascii_lowercase();
        match domain.strip_suffix(self.suffix.as_str()) {
            Some(rest) => rest.is_empty() || rest.ends_with('.'),
            None => false,
        }
    }
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}
