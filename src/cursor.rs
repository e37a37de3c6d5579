//! Sequential little-endian reads over a borrowed byte buffer.
//!
//! A [`ByteCursor`] only ever moves forward. A read that would pass the end of
//! the window fails with [`ParseError::OutOfBounds`] and leaves the offset
//! untouched. [`ByteCursor::take`] splits off a window bounded to a chunk body
//! so decoders cannot read past the declared size of the chunk they handle.

use crate::error::{ParseError, ParseResult};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Seek, SeekFrom};

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
    // Absolute file offset of the first byte of this window.
    base: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.base + self.inner.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.window().len() - self.inner.position() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn window(&self) -> &'a [u8] {
        *self.inner.get_ref()
    }

    fn out_of_bounds(&self, requested: usize) -> ParseError {
        ParseError::OutOfBounds {
            offset: self.offset(),
            requested,
            limit: self.base + self.window().len(),
        }
    }

    fn ensure(&self, n: usize) -> ParseResult<()> {
        if self.remaining() < n {
            return Err(self.out_of_bounds(n));
        }
        Ok(())
    }

    pub fn read_u16_le(&mut self) -> ParseResult<u16> {
        self.ensure(2)?;
        let err = self.out_of_bounds(2);
        self.inner.read_u16::<LittleEndian>().map_err(|_| err)
    }

    pub fn read_u32_le(&mut self) -> ParseResult<u32> {
        self.ensure(4)?;
        let err = self.out_of_bounds(4);
        self.inner.read_u32::<LittleEndian>().map_err(|_| err)
    }

    pub fn read_bytes(&mut self, n: usize) -> ParseResult<&'a [u8]> {
        self.ensure(n)?;
        let start = self.inner.position() as usize;
        let bytes = &self.window()[start..start + n];
        self.inner.set_position((start + n) as u64);
        Ok(bytes)
    }

    /// Reads at most `n` bytes, fewer when the window ends first.
    pub fn read_up_to(&mut self, n: usize) -> &'a [u8] {
        let start = self.inner.position() as usize;
        let end = start + n.min(self.remaining());
        self.inner.set_position(end as u64);
        &self.window()[start..end]
    }

    /// Reads a 4-byte chunk tag.
    pub fn read_tag(&mut self) -> ParseResult<[u8; 4]> {
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads `n` bytes as Latin-1 text with trailing NUL padding removed.
    pub fn read_fixed_string(&mut self, n: usize) -> ParseResult<String> {
        let bytes = self.read_bytes(n)?;
        Ok(latin1(bytes).trim_end_matches('\0').to_string())
    }

    pub fn skip(&mut self, n: usize) -> ParseResult<()> {
        self.ensure(n)?;
        let err = self.out_of_bounds(n);
        self.inner
            .seek(SeekFrom::Current(n as i64))
            .map(|_| ())
            .map_err(|_| err)
    }

    /// Consumes the RIFF pad byte after an odd-sized body, if one is present.
    pub fn skip_padding(&mut self, size: u32) -> ParseResult<()> {
        if size % 2 == 1 && !self.is_empty() {
            self.skip(1)?;
        }
        Ok(())
    }

    /// Splits off a cursor over the next `n` bytes and advances past them.
    pub fn take(&mut self, n: usize) -> ParseResult<ByteCursor<'a>> {
        let base = self.offset();
        let bytes = self.read_bytes(n)?;
        Ok(ByteCursor {
            inner: Cursor::new(bytes),
            base,
        })
    }
}

pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let data = [0x01, 0x02, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16_le().unwrap(), 0x0201);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(cursor.offset(), 6);
        assert!(cursor.is_empty());
    }

    #[test]
    fn fixed_string_strips_trailing_nuls_only() {
        let data = b"ab\0c\0\0\0\0";
        let mut cursor = ByteCursor::new(data);
        assert_eq!(cursor.read_fixed_string(8).unwrap(), "ab\0c");
    }

    #[test]
    fn fixed_string_decodes_latin1() {
        let data = [b'c', 0xE9, 0x00];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_fixed_string(3).unwrap(), "cé");
    }

    #[test]
    fn failed_read_does_not_move_offset() {
        let data = [0u8; 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1).unwrap();
        let err = cursor.read_u32_le().unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfBounds {
                offset: 1,
                requested: 4,
                limit: 3
            }
        );
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn read_up_to_stops_at_end_of_window() {
        let data = [b'R', b'I', b'F'];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_up_to(2), b"RI");
        assert_eq!(cursor.read_up_to(4), b"F");
        assert!(cursor.is_empty());
        assert_eq!(cursor.read_up_to(4), b"");
    }

    #[test]
    fn skip_past_end_fails() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.skip(5).is_err());
        assert!(cursor.skip(4).is_ok());
        assert!(cursor.skip(1).is_err());
    }

    #[test]
    fn padding_is_skipped_only_for_odd_sizes() {
        let data = [0u8; 2];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip_padding(4).unwrap();
        assert_eq!(cursor.offset(), 0);
        cursor.skip_padding(3).unwrap();
        assert_eq!(cursor.offset(), 1);
        cursor.skip(1).unwrap();
        // Nothing left to pad with: not an error.
        cursor.skip_padding(3).unwrap();
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn take_bounds_the_window_and_keeps_absolute_offsets() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(2).unwrap();
        let mut body = cursor.take(4).unwrap();
        assert_eq!(cursor.offset(), 6);
        assert_eq!(body.offset(), 2);
        assert_eq!(body.read_u16_le().unwrap(), 0x0403);
        let err = body.read_u32_le().unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfBounds {
                offset: 4,
                requested: 4,
                limit: 6
            }
        );
    }

    #[test]
    fn take_past_end_fails() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.take(8),
            Err(ParseError::OutOfBounds { requested: 8, .. })
        ));
        assert_eq!(cursor.offset(), 0);
    }
}
