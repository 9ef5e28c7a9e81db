//! Error type for contract violations in the adaptation core.

use thiserror::Error;

pub type AdaptResult<T> = Result<T, AdaptError>;

#[derive(Debug, Error)]
pub enum AdaptError {
    #[error("edit operations consume {consumed} symbols but the source has {expected}")]
    OpsLengthMismatch { consumed: usize, expected: usize },

    #[error("invalid edit operation: {0:?}")]
    InvalidEditOp(String),

    #[error("cost weights {deletion}/{insertion} need deletion > 2 * insertion > 0")]
    InvalidWeights { deletion: u32, insertion: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("inventory missing: {0}")]
    InventoryMissing(&'static str),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
