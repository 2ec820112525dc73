use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum IssueIdError {
    /// Malformed issue identifier.
    #[error("Invalid issue identifier: {}", id)]
    InvalidIssueId { id: String },
}

/// Opaque issue identifier, generated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(Uuid);

impl IssueId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for IssueId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for IssueId {
    type Err = IssueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl TryFrom<&str> for IssueId {
    type Error = IssueIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| IssueIdError::InvalidIssueId { id: value.into() })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::IssueId;

    #[test]
    fn display_then_parse() {
        let id = IssueId::generate();
        let parsed = IssueId::from_str(&id.to_string()).unwrap();

        assert_eq!(id, parsed);
    }

    #[test]
    fn reject_malformed() {
        assert!(IssueId::from_str("5f665eb46e296f6b9b6a504d").is_err());
        assert!(IssueId::from_str("").is_err());
    }

    #[test]
    fn serialize_as_plain_string() {
        let id = IssueId::from_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""67e55044-10b1-426f-9247-bb680e5fe0c8""#
        );
    }
}
