// Per-spectrum sub-header: 32 bytes preceding each Y array.

use super::bytes::{ByteReader, SliceWriter};
use super::error::Result;
use super::flags::SubFlags;

/// Encoded size of [`SubHeader`].
pub const SUBHEADER_SIZE: usize = 32;

/// Parsed SPC sub-header (`SUBHDR`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubHeader {
    /// Per-subfile flag byte (`subflgs`); see [`SubFlags`].
    pub flags: u8,
    /// Per-subfile exponent (`subexp`).
    pub exponent: u8,
    /// Subfile index, 0-based (`subindx`).
    pub index: u16,
    pub start_z: f32,
    pub end_z: f32,
    /// Peak-picking noise level (`subnois`).
    pub noise: f32,
    /// Point count for per-subfile-X files (`subnpts`).
    pub point_count: i32,
    /// Number of co-added scans (`subscan`).
    pub scan_count: i32,
    /// W axis value (`subwlevel`).
    pub w_axis: f32,
    pub reserved: [u8; 4],
}

impl SubHeader {
    /// Decode a sub-header starting at `offset`.
    ///
    /// Returns the sub-header and the offset just past it.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        ByteReader::at(buf, offset).take("sub-header", SUBHEADER_SIZE)?;
        let mut r = ByteReader::at(buf, offset);

        let sub = Self {
            flags: r.u8("sub-header flags")?,
            exponent: r.u8("sub-header exponent")?,
            index: r.u16("sub-header index")?,
            start_z: r.f32("sub-header start_z")?,
            end_z: r.f32("sub-header end_z")?,
            noise: r.f32("sub-header noise")?,
            point_count: r.i32("sub-header point_count")?,
            scan_count: r.i32("sub-header scan_count")?,
            w_axis: r.f32("sub-header w_axis")?,
            reserved: r.array("sub-header reserved")?,
        };
        Ok((sub, r.position()))
    }

    pub fn encode(&self) -> [u8; SUBHEADER_SIZE] {
        let mut buf = [0u8; SUBHEADER_SIZE];
        let mut w = SliceWriter::new(&mut buf);
        w.u8(self.flags);
        w.u8(self.exponent);
        w.u16(self.index);
        w.f32(self.start_z);
        w.f32(self.end_z);
        w.f32(self.noise);
        w.i32(self.point_count);
        w.i32(self.scan_count);
        w.f32(self.w_axis);
        w.bytes(&self.reserved);
        debug_assert_eq!(w.position(), SUBHEADER_SIZE);
        buf
    }

    #[inline]
    pub fn sub_flags(&self) -> SubFlags {
        SubFlags::from_byte(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subheader_roundtrip_at_offset() {
        let sub = SubHeader {
            flags: 0x09,
            exponent: 3,
            index: 7,
            start_z: 1.5,
            end_z: 2.5,
            noise: 0.01,
            point_count: 256,
            scan_count: 16,
            w_axis: -4.0,
            reserved: [1, 2, 3, 4],
        };
        let mut buf = vec![0xAAu8; 10];
        buf.extend_from_slice(&sub.encode());
        buf.push(0xBB);

        let (decoded, next) = SubHeader::decode(&buf, 10).unwrap();
        assert_eq!(decoded, sub);
        assert_eq!(next, 10 + SUBHEADER_SIZE);
        assert!(decoded.sub_flags().changed());
        assert!(decoded.sub_flags().skip_peak_table());
        assert!(!decoded.sub_flags().modified_by_arithmetic());
    }

    #[test]
    fn subheader_index_is_little_endian() {
        let sub = SubHeader {
            index: 0x0102,
            ..Default::default()
        };
        let buf = sub.encode();
        assert_eq!(&buf[2..4], &[0x02, 0x01]);
    }

    #[test]
    fn short_subheader_is_truncated() {
        let buf = [0u8; 40];
        let err = SubHeader::decode(&buf, 9).unwrap_err();
        assert!(err.is_truncated());
        assert!(SubHeader::decode(&buf, 8).is_ok());
        assert!(SubHeader::decode(&buf, usize::MAX).unwrap_err().is_truncated());
    }
}
