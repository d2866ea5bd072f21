use crate::model::Field;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Please fill in the required field: {0}")]
    MissingField(Field),

    #[error("Please enter a valid email address: {0:?}")]
    InvalidEmail(String),

    #[error("Invalid filter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store corrupt: {0}")]
    StoreCorrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl FolioError {
    /// Errors caused by the caller's input rather than by the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FolioError::MissingField(_)
                | FolioError::InvalidEmail(_)
                | FolioError::InvalidQuery(_)
                | FolioError::InvalidBody(_)
        )
    }

    /// The submission field a client should highlight, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            FolioError::MissingField(field) => Some(*field),
            FolioError::InvalidEmail(_) => Some(Field::Email),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
