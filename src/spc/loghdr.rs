// Log block header: 64 bytes following the Y samples when
// `Header::log_offset` is non-zero.

use super::bytes::{ByteReader, SliceWriter};
use super::error::Result;

/// Encoded size of [`LogHeader`].
pub const LOGHEADER_SIZE: usize = 64;

pub const LOG_RESERVED_LEN: usize = 44;

/// Parsed log block header (`LOGSTC`).
#[derive(Debug, Clone, PartialEq)]
pub struct LogHeader {
    /// Byte size of the disk block (`logsizd`).
    pub size: u32,
    /// Byte size of the memory block (`logsizm`).
    pub space: u32,
    /// Offset of the ASCII text from the log block start (`logtxto`).
    pub text_offset: u32,
    /// Size of the binary area (`logbins`).
    pub binary_size: u32,
    /// Size of the disk area (`logdsks`).
    pub binary_spacing: u32,
    pub reserved: [u8; LOG_RESERVED_LEN],
}

impl Default for LogHeader {
    fn default() -> Self {
        Self {
            size: 0,
            space: 0,
            text_offset: 0,
            binary_size: 0,
            binary_spacing: 0,
            reserved: [0; LOG_RESERVED_LEN],
        }
    }
}

impl LogHeader {
    /// Decode a log header starting at `offset`.
    ///
    /// Returns the header and the offset just past it.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        ByteReader::at(buf, offset).take("log header", LOGHEADER_SIZE)?;
        let mut r = ByteReader::at(buf, offset);

        let log = Self {
            size: r.u32("log size")?,
            space: r.u32("log space")?,
            text_offset: r.u32("log text offset")?,
            binary_size: r.u32("log binary size")?,
            binary_spacing: r.u32("log binary spacing")?,
            reserved: r.array("log reserved")?,
        };
        Ok((log, r.position()))
    }

    pub fn encode(&self) -> [u8; LOGHEADER_SIZE] {
        let mut buf = [0u8; LOGHEADER_SIZE];
        let mut w = SliceWriter::new(&mut buf);
        w.u32(self.size);
        w.u32(self.space);
        w.u32(self.text_offset);
        w.u32(self.binary_size);
        w.u32(self.binary_spacing);
        w.bytes(&self.reserved);
        debug_assert_eq!(w.position(), LOGHEADER_SIZE);
        buf
    }
}
