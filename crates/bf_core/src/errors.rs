use thiserror::Error;

#[derive(Debug, Error)]
pub enum BfError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persist: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Bad magic or version")]
    BadHeader,

    #[error("Truncated snapshot: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("Payload checksum mismatch")]
    Corrupt,

    #[error("Unsupported hasher set tag {0}")]
    Unsupported(u16),

    #[error("Hasher count mismatch: snapshot expects {expected}, got {actual}")]
    HasherCount { expected: u32, actual: usize },

    #[error("Snapshot uses custom hashers; load it with explicit hash functions")]
    CustomHashers,

    #[error("Too large for snapshot: {0}")]
    TooLarge(u64),
}

pub type Result<T> = std::result::Result<T, BfError>;
