//! Serialize-format decoding.
//!
//! The decoder follows a layered structure:
//! - `grammar`: tag bytes, delimiters and limits (source of truth)
//! - `reader`: safe cursor-based byte access
//! - `parser`: recursive-descent decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Decoding is pure and contains no I/O; every error is returned as a
//! `DecodeError`, never a panic, for any byte input.

pub mod error;
pub mod grammar;
pub mod parser;
pub mod reader;

pub use error::DecodeError;
pub use parser::Decoder;

use crate::value::Value;

/// Decodes one value from the start of `input`.
///
/// Trailing bytes after the first complete value are ignored; use
/// [`decode_prefix`] to learn how far the decoder read.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    let (value, _consumed) = decode_prefix(input)?;
    Ok(value)
}

/// Decodes one value from the start of `input` and returns it together
/// with the number of bytes consumed.
pub fn decode_prefix(input: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.decode_value()?;
    Ok((value, decoder.offset()))
}
