use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssueFieldError {
    /// Unknown issue field.
    #[error("Unknown issue field: {}", name)]
    UnknownIssueField { name: String },
}

/// Public issue field, named as on the wire.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
pub enum IssueField {
    Id,
    Project,
    IssueTitle,
    IssueText,
    CreatedOn,
    UpdatedOn,
    CreatedBy,
    AssignedTo,
    Open,
    StatusText,
}

impl IssueField {
    pub const ALL: [IssueField; 10] = [
        Self::Id,
        Self::Project,
        Self::IssueTitle,
        Self::IssueText,
        Self::CreatedOn,
        Self::UpdatedOn,
        Self::CreatedBy,
        Self::AssignedTo,
        Self::Open,
        Self::StatusText,
    ];

    /// Convert issue field to its wire name.
    pub fn to_str(self) -> &'static str {
        self.into()
    }

    /// Whether an update may rewrite this field from client input.
    pub fn is_patchable(self) -> bool {
        matches!(
            self,
            Self::IssueTitle
                | Self::IssueText
                | Self::CreatedBy
                | Self::AssignedTo
                | Self::Open
                | Self::StatusText
        )
    }
}

impl Display for IssueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for IssueField {
    type Err = IssueFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for IssueField {
    type Error = IssueFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field| field.to_str() == value)
            .ok_or_else(|| IssueFieldError::UnknownIssueField { name: value.into() })
    }
}

impl From<IssueField> for &'static str {
    fn from(field: IssueField) -> Self {
        match field {
            IssueField::Id => "_id",
            IssueField::Project => "project",
            IssueField::IssueTitle => "issue_title",
            IssueField::IssueText => "issue_text",
            IssueField::CreatedOn => "created_on",
            IssueField::UpdatedOn => "updated_on",
            IssueField::CreatedBy => "created_by",
            IssueField::AssignedTo => "assigned_to",
            IssueField::Open => "open",
            IssueField::StatusText => "status_text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IssueField;

    #[test]
    fn parse_wire_names() {
        for field in IssueField::ALL {
            assert_eq!(IssueField::try_from(field.to_str()).unwrap(), field);
        }

        assert!(IssueField::try_from("id").is_err());
        assert!(IssueField::try_from("__v").is_err());
    }

    #[test]
    fn identity_and_timestamps_are_not_patchable() {
        let patchable: Vec<_> = IssueField::ALL
            .into_iter()
            .filter(|f| f.is_patchable())
            .collect();

        assert_eq!(
            patchable,
            vec![
                IssueField::IssueTitle,
                IssueField::IssueText,
                IssueField::CreatedBy,
                IssueField::AssignedTo,
                IssueField::Open,
                IssueField::StatusText
            ]
        );
    }
}
