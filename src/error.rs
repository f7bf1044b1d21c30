use thiserror::Error;

pub type Result<T> = std::result::Result<T, SuffixTreeError>;

#[derive(Debug, Error)]
pub enum SuffixTreeError {
    /// The sentinel must be absent from the indexed text, otherwise two
    /// suffixes could end on the same path and leaves would be ambiguous.
    #[error("sentinel {sentinel:?} already occurs in the text at offset {position}")]
    SentinelCollision { sentinel: char, position: usize },

    #[error("sentinel {0:?} is not a single-byte ASCII character")]
    InvalidSentinel(char),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
