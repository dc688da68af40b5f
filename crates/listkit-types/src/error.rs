use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid index path {0:?}: expected \"section.item\"")]
    InvalidIndexPath(String),

    #[error("invalid index {value:?}: {reason}")]
    InvalidIndex { value: String, reason: String },
}
