//! Email address value object: equality by normalized value.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated, normalized (trimmed + lowercased) email address.
///
/// Emails resolve invite targets, so two spellings of the same address must
/// compare equal. Validation here is shape-only; deliverability is the
/// notifier's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(DomainError::validation(format!(
                "not an email address: {raw}"
            )));
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(DomainError::validation(format!(
                "not an email address: {raw}"
            )));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(format!(
                "not an email address: {raw}"
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
