use super::error::DecodeError;
use super::grammar;

/// Forward-only cursor over a borrowed byte buffer.
///
/// Every access is bounds-checked and reports `UnexpectedEnd` with the
/// position that would have been needed; the cursor never moves past
/// the end of the buffer and never moves backwards.
pub struct ByteReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    fn require(&self, needed: usize) -> Result<(), DecodeError> {
        if needed > self.input.len() {
            return Err(DecodeError::UnexpectedEnd {
                needed,
                actual: self.input.len(),
            });
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .input
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEnd {
                needed: self.pos + 1,
                actual: self.input.len(),
            })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        let needed = self.pos.checked_add(count).unwrap_or(usize::MAX);
        self.require(needed)?;
        self.pos = needed;
        Ok(())
    }

    pub fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let needed = self.pos.checked_add(count).unwrap_or(usize::MAX);
        self.require(needed)?;
        let bytes = &self.input[self.pos..needed];
        self.pos = needed;
        Ok(bytes)
    }

    /// Scans forward to the next `:` or `;` and returns the bytes in
    /// between. The cursor is left on the delimiter itself; the caller
    /// skips past it.
    pub fn scan_token(&mut self) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        while let Some(&byte) = self.input.get(self.pos) {
            if byte == grammar::FIELD_SEP || byte == grammar::VALUE_END {
                return Ok(&self.input[start..self.pos]);
            }
            self.pos += 1;
        }
        Err(DecodeError::UnexpectedEnd {
            needed: self.pos + 1,
            actual: self.input.len(),
        })
    }
}
