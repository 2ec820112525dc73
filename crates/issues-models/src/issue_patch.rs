use thiserror::Error;
use time::OffsetDateTime;

use crate::IssueField;

#[derive(Debug, Error)]
pub enum PatchValueError {
    /// Value cannot be stored in a boolean field.
    #[error("Invalid boolean value for '{}': {}", field, value)]
    InvalidFlag { field: IssueField, value: String },
}

/// Value accepted for one field of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    Text(String),
    Flag(bool),
}

impl PatchValue {
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Flag(value) => value.to_string(),
        }
    }

    /// Cast to the boolean `open` field, following the document schema
    /// rules the stored records were first written with.
    pub fn to_flag(&self) -> Result<bool, PatchValueError> {
        match self {
            Self::Flag(value) => Ok(*value),
            Self::Text(value) => match &value[..] {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(PatchValueError::InvalidFlag {
                    field: IssueField::Open,
                    value: value.clone(),
                }),
            },
        }
    }
}

/// Sparse update of an issue.
///
/// Always carries a new `updated_on` stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePatch {
    values: Vec<(IssueField, PatchValue)>,
    updated_on: OffsetDateTime,
}

impl IssuePatch {
    pub fn new(values: Vec<(IssueField, PatchValue)>, updated_on: OffsetDateTime) -> Self {
        Self { values, updated_on }
    }

    pub fn values(&self) -> &[(IssueField, PatchValue)] {
        &self.values
    }

    pub fn get(&self, field: IssueField) -> Option<&PatchValue> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn updated_on(&self) -> OffsetDateTime {
        self.updated_on
    }
}
