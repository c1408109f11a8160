use thiserror::Error;

/// Everything which can go wrong while reading lines back.
#[derive(Error, Debug)]
pub enum Error {
    /// A chunk size of zero would never make any progress.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The newline table is empty or contains an empty sequence.
    #[error("newline sequences must be non-empty: {reason}")]
    InvalidNewlines { reason: &'static str },

    /// The requested encoding isn't supported.
    #[error("unsupported encoding: {name}")]
    UnsupportedEncoding { name: String },

    /// A line contains bytes which aren't valid in the configured encoding.
    ///
    /// `bytes` is the raw line, so it can still be decoded some other way.
    #[error("line isn't valid {encoding} (invalid byte at index {position})")]
    Decode {
        encoding: &'static str,
        position: usize,
        bytes: Vec<u8>,
    },

    /// Seeking or reading the underlying source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the raw line of a [`Error::Decode`] and `None` for every other error.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Error::Decode { bytes, .. } => Some(bytes),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
