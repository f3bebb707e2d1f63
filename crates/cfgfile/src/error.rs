use std::io;
use std::path::PathBuf;

use hashindex::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("short read: expected {expected} bytes, read {read}")]
    Truncated { expected: u64, read: u64 },
    #[error("out of memory reserving {requested} bytes")]
    OutOfMemory { requested: u64 },
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("`{key}` holds a {found}, not a {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("index is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },
    #[error("invalid key {0:?}: keys are non-empty runs of letters, digits, `_` or `-`")]
    InvalidKey(String),
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

impl From<IndexError> for StoreError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::CapacityExceeded { capacity } => StoreError::CapacityExceeded { capacity },
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
