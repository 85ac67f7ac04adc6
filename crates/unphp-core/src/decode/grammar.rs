pub const TAG_NULL: u8 = b'N';
pub const TAG_BOOL: u8 = b'b';
pub const TAG_INT: u8 = b'i';
pub const TAG_FLOAT: u8 = b'd';
pub const TAG_STRING: u8 = b's';
pub const TAG_ARRAY: u8 = b'a';
pub const TAG_OBJECT: u8 = b'O';
pub const TAG_CUSTOM: u8 = b'C';

pub const BRACE_OPEN: u8 = b'{';
pub const BRACE_CLOSE: u8 = b'}';
pub const FIELD_SEP: u8 = b':';
pub const VALUE_END: u8 = b';';

/// Maximum nesting depth accepted before decoding fails with
/// `DecodeError::DepthLimit`. The grammar itself is unbounded; the
/// limit keeps hostile input from overflowing the thread stack.
pub const MAX_DEPTH: usize = 128;
