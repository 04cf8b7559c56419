use std::io;

use thiserror::Error;

/// Reasons an entry can be refused by [`ZipWriter`](super::ZipWriter).
///
/// All of these are raised when the entry is added; building never fails.
#[derive(Debug, Error)]
pub enum ZipWriteError {
    #[error("Invalid payload for {name}: {reason}")]
    InvalidPayload {
        name: String,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("File name is {len} bytes, the limit is 65535")]
    NameTooLong { len: usize },

    #[error("Archive already holds the maximum of 65535 entries")]
    TooManyEntries,
}

impl ZipWriteError {
    pub(crate) fn payload(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            name: name.to_string(),
            reason: reason.into(),
            source: None,
        }
    }
}
