use issues_models::PatchValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid field value: {source}")]
    InvalidFieldValue { source: PatchValueError },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<PatchValueError> for DatabaseError {
    fn from(e: PatchValueError) -> Self {
        Self::InvalidFieldValue { source: e }
    }
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
