pub mod contacts;
pub mod messages;
pub mod types;

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no contact found with ID {0}")]
    ContactNotFound(i64),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
