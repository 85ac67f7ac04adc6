use thiserror::Error;

/// Errors returned by the serialize-format decoder.
///
/// Every variant carries enough position information to point at the
/// offending bytes; no variant is recovered from internally.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown type tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("malformed number {token:?} at offset {offset}")]
    MalformedNumber { token: String, offset: usize },
    #[error("array key must be an int or a string (offset {offset})")]
    InvalidArrayKey { offset: usize },
    #[error("object property key must be a string (offset {offset})")]
    InvalidPropertyKey { offset: usize },
    #[error("input too short: need {needed} bytes, got {actual}")]
    UnexpectedEnd { needed: usize, actual: usize },
    #[error("nesting exceeds {limit} levels at offset {offset}")]
    DepthLimit { limit: usize, offset: usize },
}
