//! RLP stream reader
//!
//! Decode-only reader over an in-memory buffer. Every item is checked
//! against both the buffer and the enclosing list before it is consumed, so
//! callers never do their own bounds bookkeeping. Only canonical encodings
//! are accepted.

use primitive_types::U256;
use thiserror::Error;

/// Result type for RLP decoding
pub type Result<T> = std::result::Result<T, RlpError>;

/// Malformed RLP input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlpError {
    /// Input ends before the item it declares
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// Item extends past the end of its enclosing list
    #[error("Item at offset {offset} exceeds its enclosing list")]
    ItemExceedsList { offset: usize },

    /// Read attempted after the last item of the current list
    #[error("No more items in list at offset {offset}")]
    EndOfList { offset: usize },

    #[error("Expected a list at offset {offset}")]
    ExpectedList { offset: usize },

    #[error("Expected a byte string at offset {offset}")]
    ExpectedString { offset: usize },

    /// Single byte below 0x80 wrapped in a string header
    #[error("Non-canonical single byte encoding at offset {offset}")]
    NonCanonicalSingleByte { offset: usize },

    /// Long-form length that fits the short form, or has leading zeros
    #[error("Non-canonical length encoding at offset {offset}")]
    NonCanonicalLength { offset: usize },

    #[error("Declared length overflows at offset {offset}")]
    LengthOverflow { offset: usize },

    #[error("Scalar has leading zero bytes")]
    LeadingZeros,

    #[error("Scalar too large: {actual} bytes, maximum {max}")]
    ScalarTooLarge { max: usize, actual: usize },

    /// One-byte field whose payload is not exactly one byte
    #[error("Expected a single byte at offset {offset}, found {actual} bytes")]
    ExpectedSingleByte { offset: usize, actual: usize },

    /// `leave_list` called before all list items were read
    #[error("List not fully consumed: {remaining} bytes left")]
    ListNotFinished { remaining: usize },

    #[error("Not inside a list")]
    NotInList,

    #[error("{depth} list(s) not closed")]
    UnclosedList { depth: usize },

    /// Bytes after the outermost item
    #[error("{remaining} trailing bytes after last item")]
    TrailingBytes { remaining: usize },
}

#[derive(Clone, Copy, Debug)]
struct ItemHeader {
    payload_offset: usize,
    payload_len: usize,
    is_list: bool,
}

impl ItemHeader {
    fn end(&self) -> usize {
        self.payload_offset + self.payload_len
    }
}

/// Sequential reader over an RLP-encoded buffer
pub struct RlpReader<'a> {
    input: &'a [u8],
    pos: usize,
    list_ends: Vec<usize>,
}

impl<'a> RlpReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            list_ends: Vec::new(),
        }
    }

    /// Nesting depth of entered lists
    pub fn depth(&self) -> usize {
        self.list_ends.len()
    }

    fn limit(&self) -> usize {
        self.list_ends.last().copied().unwrap_or(self.input.len())
    }

    /// True when the current list (or the whole input, at top level) has no items left
    pub fn is_end_of_list(&self) -> bool {
        self.pos >= self.limit()
    }

    /// Enter the list at the current position.
    pub fn enter_list(&mut self) -> Result<()> {
        let header = self.header()?;
        if !header.is_list {
            return Err(RlpError::ExpectedList { offset: self.pos });
        }
        self.list_ends.push(header.end());
        self.pos = header.payload_offset;
        Ok(())
    }

    /// Leave the current list. Every item in it must have been read.
    pub fn leave_list(&mut self) -> Result<()> {
        let end = self.list_ends.last().copied().ok_or(RlpError::NotInList)?;
        if self.pos != end {
            return Err(RlpError::ListNotFinished {
                remaining: end.saturating_sub(self.pos),
            });
        }
        self.list_ends.pop();
        Ok(())
    }

    /// Read the list at the current position, one element per `read_item` call.
    pub fn read_list<T, E, F>(&mut self, mut read_item: F) -> std::result::Result<Vec<T>, E>
    where
        E: From<RlpError>,
        F: FnMut(&mut Self) -> std::result::Result<T, E>,
    {
        self.enter_list()?;
        let mut items = Vec::new();
        while !self.is_end_of_list() {
            items.push(read_item(self)?);
        }
        self.leave_list()?;
        Ok(items)
    }

    /// Read a byte string.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let header = self.header()?;
        if header.is_list {
            return Err(RlpError::ExpectedString { offset: self.pos });
        }
        let input = self.input;
        self.pos = header.end();
        Ok(&input[header.payload_offset..header.end()])
    }

    fn read_scalar_bytes(&mut self, max: usize) -> Result<&'a [u8]> {
        let bytes = self.read_bytes()?;
        if bytes.len() > max {
            return Err(RlpError::ScalarTooLarge {
                max,
                actual: bytes.len(),
            });
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::LeadingZeros);
        }
        Ok(bytes)
    }

    /// Read a raw one-byte string. Any value is allowed, including `0x00`;
    /// the empty string is not a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let offset = self.pos;
        match self.read_bytes()? {
            [byte] => Ok(*byte),
            other => Err(RlpError::ExpectedSingleByte {
                offset,
                actual: other.len(),
            }),
        }
    }

    /// Read a scalar of at most 8 bytes.
    pub fn read_u64_scalar(&mut self) -> Result<u64> {
        let bytes = self.read_scalar_bytes(8)?;
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Read a scalar of at most 32 bytes.
    pub fn read_u256_scalar(&mut self) -> Result<U256> {
        let bytes = self.read_scalar_bytes(32)?;
        Ok(U256::from_big_endian(bytes))
    }

    /// Ensure the whole input was consumed and every list closed.
    pub fn finish(&self) -> Result<()> {
        if !self.list_ends.is_empty() {
            return Err(RlpError::UnclosedList {
                depth: self.list_ends.len(),
            });
        }
        if self.pos != self.input.len() {
            return Err(RlpError::TrailingBytes {
                remaining: self.input.len() - self.pos,
            });
        }
        Ok(())
    }

    /// Parse the header of the item at the current position without consuming it.
    fn header(&self) -> Result<ItemHeader> {
        let offset = self.pos;
        let limit = self.limit();
        if offset >= limit {
            return Err(if self.list_ends.is_empty() {
                RlpError::UnexpectedEof { offset }
            } else {
                RlpError::EndOfList { offset }
            });
        }

        let prefix = self.input[offset];
        let header = match prefix {
            0x00..=0x7f => ItemHeader {
                payload_offset: offset,
                payload_len: 1,
                is_list: false,
            },
            0x80..=0xb7 => {
                let len = usize::from(prefix - 0x80);
                if len == 1 {
                    let byte = self.byte_at(offset + 1)?;
                    if byte < 0x80 {
                        return Err(RlpError::NonCanonicalSingleByte { offset });
                    }
                }
                ItemHeader {
                    payload_offset: offset + 1,
                    payload_len: len,
                    is_list: false,
                }
            }
            0xb8..=0xbf => {
                let len_of_len = usize::from(prefix - 0xb7);
                ItemHeader {
                    payload_offset: offset + 1 + len_of_len,
                    payload_len: self.long_length(offset, len_of_len)?,
                    is_list: false,
                }
            }
            0xc0..=0xf7 => ItemHeader {
                payload_offset: offset + 1,
                payload_len: usize::from(prefix - 0xc0),
                is_list: true,
            },
            0xf8..=0xff => {
                let len_of_len = usize::from(prefix - 0xf7);
                ItemHeader {
                    payload_offset: offset + 1 + len_of_len,
                    payload_len: self.long_length(offset, len_of_len)?,
                    is_list: true,
                }
            }
        };

        let end = header
            .payload_offset
            .checked_add(header.payload_len)
            .ok_or(RlpError::LengthOverflow { offset })?;
        if end > self.input.len() {
            return Err(RlpError::UnexpectedEof { offset });
        }
        if end > limit {
            return Err(RlpError::ItemExceedsList { offset });
        }
        Ok(header)
    }

    /// Decode a big-endian long-form length following the prefix at `offset`.
    fn long_length(&self, offset: usize, len_of_len: usize) -> Result<usize> {
        let start = offset + 1;
        let end = start + len_of_len;
        if end > self.input.len() {
            return Err(RlpError::UnexpectedEof { offset });
        }
        let len_bytes = &self.input[start..end];
        if len_bytes[0] == 0 {
            return Err(RlpError::NonCanonicalLength { offset });
        }
        let len = len_bytes.iter().try_fold(0usize, |acc, &b| {
            acc.checked_mul(256)
                .and_then(|v| v.checked_add(usize::from(b)))
                .ok_or(RlpError::LengthOverflow { offset })
        })?;
        if len <= 55 {
            return Err(RlpError::NonCanonicalLength { offset });
        }
        Ok(len)
    }

    fn byte_at(&self, offset: usize) -> Result<u8> {
        self.input
            .get(offset)
            .copied()
            .ok_or(RlpError::UnexpectedEof { offset })
    }
}
