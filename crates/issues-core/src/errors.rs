//! Domain errors.

use thiserror::Error;

/// Domain error.
///
/// Every variant but [`DomainError::DatabaseError`] is a request rejection:
/// its message is the one sent back to the client.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    #[error("could not update")]
    UpdateFailed { id: String },

    #[error("could not delete")]
    DeleteFailed { id: String },

    /// Wraps [`issues_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: issues_database_interface::DatabaseError,
    },
}

impl DomainError {
    /// Whether the request was rejected, as opposed to failed.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::DatabaseError { .. })
    }

    /// Identifier echoed back with the rejection, if any.
    pub fn issue_id(&self) -> Option<&str> {
        match self {
            Self::NoUpdateFields { id } | Self::UpdateFailed { id } | Self::DeleteFailed { id } => {
                Some(id)
            }
            _ => None,
        }
    }
}

impl From<issues_database_interface::DatabaseError> for DomainError {
    fn from(e: issues_database_interface::DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
