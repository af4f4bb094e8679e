use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Product '{id}' not found")]
    ProductNotFound { id: String },

    #[error("Product id '{id}' already exists in the catalog")]
    DuplicateProductId { id: String },

    #[error("Position {position} out of range for catalog of {len} products")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Invalid fee schedule: {reason}")]
    InvalidFeeSchedule { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
