use thiserror::Error;

use crate::model::Entity;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached at all.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The read was issued but failed or ran out of time.
    #[error("query on {entity} failed: {message}")]
    QueryFailed { entity: Entity, message: String },

    /// A row came back in a shape the schema does not allow.
    #[error("could not map {entity} row: {message}")]
    SerializationFailed { entity: Entity, message: String },
}

impl StoreError {
    pub fn query_failed(entity: Entity, message: impl Into<String>) -> Self {
        StoreError::QueryFailed {
            entity,
            message: message.into(),
        }
    }

    /// Sorts a driver error into the store taxonomy.
    pub fn from_sqlx(entity: Entity, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => StoreError::StorageUnavailable(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => StoreError::SerializationFailed {
                entity,
                message: err.to_string(),
            },
            other => StoreError::query_failed(entity, other.to_string()),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable(_))
    }
}
