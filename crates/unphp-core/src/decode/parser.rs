use std::collections::BTreeMap;

use super::error::DecodeError;
use super::grammar;
use super::reader::ByteReader;
use crate::value::Value;

/// Recursive-descent decoder over one buffer.
///
/// A decoder is single-use: it owns the cursor for one top-level
/// `decode_value` call and is not reset afterwards. Concurrent decodes
/// each construct their own instance; no state is shared.
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(input),
            depth: 0,
        }
    }

    /// Byte offset one past the last consumed byte.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Decodes one value starting at the current cursor position.
    ///
    /// This is the sole recursion point: array elements, object
    /// properties and custom-object payloads all come back through
    /// here.
    pub fn decode_value(&mut self) -> Result<Value, DecodeError> {
        if self.depth >= grammar::MAX_DEPTH {
            return Err(DecodeError::DepthLimit {
                limit: grammar::MAX_DEPTH,
                offset: self.reader.offset(),
            });
        }
        let tag_offset = self.reader.offset();
        let tag = self.reader.read_byte()?;
        self.depth += 1;
        let value = match tag {
            grammar::TAG_NULL => {
                self.reader.skip(1)?; // ';'
                Ok(Value::Null)
            }
            grammar::TAG_BOOL => self.decode_bool(),
            grammar::TAG_INT => self.decode_int(),
            grammar::TAG_FLOAT => self.decode_float(),
            grammar::TAG_STRING => self.decode_string().map(Value::String),
            grammar::TAG_ARRAY => self.decode_array(),
            grammar::TAG_OBJECT => self.decode_object(),
            grammar::TAG_CUSTOM => self.decode_custom(),
            // Stray braces are structural no-ops in the source format:
            // the byte after the tag is consumed and the value is Null.
            grammar::BRACE_OPEN | grammar::BRACE_CLOSE => {
                self.reader.skip(1)?;
                Ok(Value::Null)
            }
            other => Err(DecodeError::UnknownTag {
                tag: other,
                offset: tag_offset,
            }),
        };
        self.depth -= 1;
        value
    }

    fn decode_bool(&mut self) -> Result<Value, DecodeError> {
        self.reader.skip(1)?; // ':'
        let flag = self.reader.read_byte()?;
        self.reader.skip(1)?; // ';'
        Ok(Value::Bool(flag != b'0'))
    }

    fn decode_int(&mut self) -> Result<Value, DecodeError> {
        self.reader.skip(1)?; // ':'
        let value = self.read_int_token()?;
        self.reader.skip(1)?; // ';'
        Ok(Value::Int(value))
    }

    fn decode_float(&mut self) -> Result<Value, DecodeError> {
        self.reader.skip(1)?; // ':'
        let offset = self.reader.offset();
        let token = self.reader.scan_token()?;
        let value = std::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or_else(|| malformed(token, offset))?;
        self.reader.skip(1)?; // ';'
        Ok(Value::Float(value))
    }

    /// Decodes `:<len>:"<bytes>"<sep>` where the leading `:` follows
    /// the tag (or a class-name position inside `O`/`C`) and `<sep>` is
    /// the terminator after the closing quote (`;` or `:`). Content is
    /// read by declared length, so embedded quotes and delimiters pass
    /// through untouched.
    fn decode_string(&mut self) -> Result<String, DecodeError> {
        self.reader.skip(1)?; // ':'
        let len = self.read_len_token()?;
        self.reader.skip(2)?; // ':' and opening '"'
        let bytes = self.reader.take(len)?;
        self.reader.skip(2)?; // closing '"' and separator
        Ok(strip_nul_bytes(bytes))
    }

    fn decode_array(&mut self) -> Result<Value, DecodeError> {
        self.reader.skip(1)?; // ':'
        let count = self.read_len_token()?;
        self.reader.skip(2)?; // ':' and '{'

        let mut list: Vec<Value> = Vec::new();
        let mut map: BTreeMap<String, Value> = BTreeMap::new();
        // Source-format arrays carry explicit keys even when they are a
        // plain sequence. An array stays a list only while its integer
        // keys are exactly 0..n-1 in encounter order and no string key
        // has appeared.
        let mut has_string_key = false;
        let mut not_a_list = false;

        for index in 0..count {
            let key_offset = self.reader.offset();
            let key = self.decode_value()?;
            let value = self.decode_value()?;
            match key {
                Value::String(name) => {
                    has_string_key = true;
                    map.insert(name, value);
                }
                Value::Int(key) => {
                    if has_string_key || key != index as i64 || not_a_list {
                        map.insert(key.to_string(), value);
                        if key != index as i64 {
                            not_a_list = true;
                        }
                    } else {
                        list.push(value);
                    }
                }
                _ => return Err(DecodeError::InvalidArrayKey { offset: key_offset }),
            }
        }

        // Mixed case: entries that still looked sequential are folded
        // into the map, re-keyed by their position in the list
        // accumulator rather than the key they carried in the input.
        if !map.is_empty() && !list.is_empty() {
            for (position, value) in list.drain(..).enumerate() {
                map.insert(position.to_string(), value);
            }
        }

        self.reader.skip(1)?; // '}'
        if map.is_empty() {
            Ok(Value::List(list))
        } else {
            Ok(Value::Map(map))
        }
    }

    fn decode_object(&mut self) -> Result<Value, DecodeError> {
        // Class identity is metadata only and is never restored.
        let _class_name = self.decode_string()?;
        let count = self.read_len_token()?;
        self.reader.skip(2)?; // ':' and '{'

        let mut props: BTreeMap<String, Value> = BTreeMap::new();
        for _ in 0..count {
            let key_offset = self.reader.offset();
            let name = match self.decode_value()? {
                Value::String(name) => name,
                _ => return Err(DecodeError::InvalidPropertyKey { offset: key_offset }),
            };
            let value = self.decode_value()?;
            props.insert(name, value);
        }

        self.reader.skip(1)?; // '}'
        Ok(Value::Map(props))
    }

    fn decode_custom(&mut self) -> Result<Value, DecodeError> {
        let class_name = self.decode_string()?;
        // Declared payload length is descriptive only; the format does
        // not require it to match the nested value.
        let _data_len = self.read_len_token()?;
        self.reader.skip(2)?; // ':' and '{'
        let payload = self.decode_value()?;
        self.reader.skip(1)?; // '}'

        // Known lossy behavior inherited from the source format: only a
        // map payload is wrapped; any scalar payload is dropped and an
        // empty map is returned.
        let mut wrapper: BTreeMap<String, Value> = BTreeMap::new();
        if let Value::Map(inner) = payload {
            wrapper.insert(class_name, Value::Map(inner));
        }
        Ok(Value::Map(wrapper))
    }

    fn read_int_token(&mut self) -> Result<i64, DecodeError> {
        let offset = self.reader.offset();
        let token = self.reader.scan_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| malformed(token, offset))
    }

    /// Reads an int token used as a length or count; negative values
    /// are malformed.
    fn read_len_token(&mut self) -> Result<usize, DecodeError> {
        let offset = self.reader.offset();
        let value = self.read_int_token()?;
        usize::try_from(value).map_err(|_| DecodeError::MalformedNumber {
            token: value.to_string(),
            offset,
        })
    }
}

fn malformed(token: &[u8], offset: usize) -> DecodeError {
    DecodeError::MalformedNumber {
        token: String::from_utf8_lossy(token).into_owned(),
        offset,
    }
}

/// Converts raw string content, dropping embedded NUL bytes.
///
/// NUL stripping matches the source format's consumers but is lossy:
/// private/protected property names encode their visibility with
/// leading NUL-delimited markers, which this removes.
fn strip_nul_bytes(bytes: &[u8]) -> String {
    let kept: Vec<u8> = bytes.iter().copied().filter(|&byte| byte != 0).collect();
    String::from_utf8_lossy(&kept).into_owned()
}
