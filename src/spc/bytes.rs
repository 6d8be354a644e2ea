// Little-endian field access over byte slices.
//
// Every SPC structure is a run of fixed-width little-endian fields, so the
// codecs share one bounds-checked reader and one positional writer. Reads
// past the end become `SpcError::TruncatedInput` rather than a panic.

use super::error::{Result, SpcError};

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Forward-only cursor over an input buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Cursor positioned at `pos`. The position may lie past the end; the
    /// first read will then fail.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, what: &'static str, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| SpcError::truncated(what, self.pos, n, self.remaining()))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    /// Read a fixed-size byte array.
    pub fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(what, N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.array::<1>(what)?[0])
    }

    #[inline]
    pub fn u16(&mut self, what: &'static str) -> Result<u16> {
        self.array(what).map(u16::from_le_bytes)
    }

    #[inline]
    pub fn i16(&mut self, what: &'static str) -> Result<i16> {
        self.array(what).map(i16::from_le_bytes)
    }

    #[inline]
    pub fn u32(&mut self, what: &'static str) -> Result<u32> {
        self.array(what).map(u32::from_le_bytes)
    }

    #[inline]
    pub fn i32(&mut self, what: &'static str) -> Result<i32> {
        self.array(what).map(i32::from_le_bytes)
    }

    #[inline]
    pub fn f32(&mut self, what: &'static str) -> Result<f32> {
        self.array(what).map(f32::from_le_bytes)
    }

    #[inline]
    pub fn f64(&mut self, what: &'static str) -> Result<f64> {
        self.array(what).map(f64::from_le_bytes)
    }

    /// Read `count` consecutive `f32` values.
    pub fn f32_vec(&mut self, what: &'static str, count: usize) -> Result<Vec<f32>> {
        let raw = self.take(what, array_len(what, self.pos, count)?)?;
        Ok(raw
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read `count` consecutive `i32` values.
    pub fn i32_vec(&mut self, what: &'static str, count: usize) -> Result<Vec<i32>> {
        let raw = self.take(what, array_len(what, self.pos, count)?)?;
        Ok(raw
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// Byte length of `count` four-byte samples, or a truncation error when the
/// product cannot even be represented.
fn array_len(what: &'static str, offset: usize, count: usize) -> Result<usize> {
    count
        .checked_mul(4)
        .ok_or_else(|| SpcError::truncated(what, offset, usize::MAX, 0))
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Positional writer over a fixed-size output block.
///
/// Callers size the block from the layout constants, so a write past the
/// end is a layout bug and panics.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn bytes(&mut self, data: &[u8]) {
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
    }

    #[inline]
    pub fn u8(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    #[inline]
    pub fn u16(&mut self, v: u16) {
        self.bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn i16(&mut self, v: i16) {
        self.bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn i32(&mut self, v: i32) {
        self.bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn f32(&mut self, v: f32) {
        self.bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn f64(&mut self, v: f64) {
        self.bytes(&v.to_le_bytes());
    }
}

/// Append `values` as little-endian `f32` to `out`.
pub fn extend_f32(out: &mut Vec<u8>, values: &[f32]) {
    out.reserve(values.len() * 4);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_fields() {
        let mut data = Vec::new();
        data.push(0xAB);
        data.extend_from_slice(&0x1234u16.to_le_bytes());
        data.extend_from_slice(&(-2i32).to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&(-0.25f64).to_le_bytes());

        let mut r = ByteReader::new(&data);
        assert_eq!(r.u8("a").unwrap(), 0xAB);
        assert_eq!(r.u16("b").unwrap(), 0x1234);
        assert_eq!(r.i32("c").unwrap(), -2);
        assert_eq!(r.f32("d").unwrap(), 1.5);
        assert_eq!(r.f64("e").unwrap(), -0.25);
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.position(), data.len());
    }

    #[test]
    fn short_read_reports_position() {
        let data = [0u8; 3];
        let mut r = ByteReader::new(&data);
        r.u8("lead").unwrap();
        match r.i32("value") {
            Err(SpcError::TruncatedInput {
                what,
                offset,
                needed,
                available,
            }) => {
                assert_eq!(what, "value");
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
        // A failed read does not move the cursor.
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn cursor_past_end_fails_cleanly() {
        let data = [0u8; 4];
        let mut r = ByteReader::at(&data, 10);
        assert_eq!(r.remaining(), 0);
        assert!(r.u8("x").unwrap_err().is_truncated());
    }

    #[test]
    fn huge_sample_count_does_not_overflow() {
        let data = [0u8; 8];
        let mut r = ByteReader::new(&data);
        assert!(r.f32_vec("y", usize::MAX).unwrap_err().is_truncated());
        assert!(r.i32_vec("y", usize::MAX / 2).unwrap_err().is_truncated());
    }

    #[test]
    fn sample_vectors() {
        let mut data = Vec::new();
        extend_f32(&mut data, &[1.0, -2.0, 3.5]);
        data.extend_from_slice(&7i32.to_le_bytes());
        data.extend_from_slice(&(-7i32).to_le_bytes());

        let mut r = ByteReader::new(&data);
        assert_eq!(r.f32_vec("x", 3).unwrap(), vec![1.0, -2.0, 3.5]);
        assert_eq!(r.i32_vec("y", 2).unwrap(), vec![7, -7]);
    }

    #[test]
    fn writer_matches_reader() {
        let mut block = [0u8; 19];
        let mut w = SliceWriter::new(&mut block);
        w.u8(9);
        w.i16(-300);
        w.u32(0xDEAD_BEEF);
        w.f32(0.5);
        w.f64(1e10);
        assert_eq!(w.position(), 19);

        let mut r = ByteReader::new(&block);
        assert_eq!(r.u8("a").unwrap(), 9);
        assert_eq!(r.i16("b").unwrap(), -300);
        assert_eq!(r.u32("c").unwrap(), 0xDEAD_BEEF);
        assert_eq!(r.f32("d").unwrap(), 0.5);
        assert_eq!(r.f64("e").unwrap(), 1e10);
    }
}
