//! Core library for reading PHP `serialize()` output without a PHP
//! runtime.
//!
//! This crate implements the decoder used by the CLI: a single-pass,
//! recursive-descent parser over a byte buffer that walks the
//! length-prefixed serialize grammar and emits a generic [`Value`]
//! tree. A thin bridge re-serializes that tree as JSON. Decoding is
//! byte-oriented and side-effect free; all I/O lives in the CLI crate.
//! Grammar conventions are captured in `decode::grammar` and the
//! cursor discipline in `decode::reader` so the parser stays minimal.
//!
//! Invariants:
//! - Decoding is total: any byte input yields a `Value` or a
//!   [`DecodeError`], never a panic or abort.
//! - A decoded array is exactly one of list or map, decided purely by
//!   the sequence of keys encountered.
//! - Class names of serialized objects are read but never retained.
//! - JSON output is deterministic (map keys in sorted order).
//!
//! # Examples
//! ```
//! use unphp_core::decode;
//!
//! let value = decode(b"a:3:{i:0;s:1:\"a\";i:1;s:1:\"b\";i:2;s:1:\"c\";}")?;
//! assert_eq!(value.as_list().map(|items| items.len()), Some(3));
//! # Ok::<(), unphp_core::DecodeError>(())
//! ```

pub mod decode;
mod json;
mod value;

pub use decode::{DecodeError, Decoder, decode, decode_prefix};
pub use json::{JsonError, to_json, to_json_pretty};
pub use value::Value;
