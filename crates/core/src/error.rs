//! Error types for Cascade containers.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Result type alias for Cascade operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for container operations.
///
/// Boolean "not found" / "already present" outcomes (`remove`, `try_add`,
/// `unregister`) are normal return values, not errors. Propagation itself
/// never returns an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Positional access beyond the end of a list.
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// Lookup by a key that is not present, where presence was required.
    KeyNotFound {
        key: String,
    },
    /// Add with a key that is already present.
    DuplicateKey {
        key: String,
    },
    /// Degenerate argument, e.g. a range count overrunning the collection.
    InvalidArgument {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            Error::KeyNotFound { key } => {
                write!(f, "Key not found: {}", key)
            }
            Error::DuplicateKey { key } => {
                write!(f, "Duplicate key: {}", key)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates an index out of range error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Creates a key not found error. The key is rendered via `Debug`.
    pub fn key_not_found(key: &impl fmt::Debug) -> Self {
        Error::KeyNotFound {
            key: format!("{:?}", key),
        }
    }

    /// Creates a duplicate key error. The key is rendered via `Debug`.
    pub fn duplicate_key(key: &impl fmt::Debug) -> Self {
        Error::DuplicateKey {
            key: format!("{:?}", key),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
