// SPC main header: the fixed 512-byte block at the start of every file.
//
// All multi-byte fields are little-endian. The layout is positional with no
// padding; field names follow the vendor `SPCHDR` structure.

use super::bytes::{ByteReader, SliceWriter};
use super::date::Date;
use super::error::Result;
use super::flags::FlagSet;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Encoded size of [`Header`].
pub const HEADER_SIZE: usize = 512;

/// Exponent value marking Y samples as IEEE floats instead of scaled integers.
pub const FLOAT_EXPONENT: u8 = 128;

/// Format version byte for the new (little-endian) layout.
pub const VERSION_NEW_LSB: u8 = 0x4B;

pub const RESOLUTION_LEN: usize = 9;
pub const SOURCE_LEN: usize = 9;
pub const SPARE_LEN: usize = 32;
pub const COMMENT_LEN: usize = 130;
pub const AXIS_LABELS_LEN: usize = 30;
pub const METHOD_LEN: usize = 48;
pub const RESERVED_LEN: usize = 187;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Parsed SPC main header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// File-type flag byte (`ftflgs`); see [`FlagSet`].
    pub flags: u8,
    /// Format version (`fversn`).
    pub version: u8,
    /// Experiment/instrument technique code (`fexper`).
    pub experiment: u8,
    /// Y scaling exponent (`fexp`); [`FLOAT_EXPONENT`] for float samples.
    pub exponent: u8,
    /// Number of points per spectrum (`fnpts`).
    pub point_count: i32,
    /// First X value, used when X is generated (`ffirst`).
    pub first_x: f64,
    /// Last X value, used when X is generated (`flast`).
    pub last_x: f64,
    /// Number of subfiles (`fnsub`).
    pub subfile_count: i32,
    /// X axis units code (`fxtype`).
    pub x_type: u8,
    /// Y axis units code (`fytype`).
    pub y_type: u8,
    /// Z axis units code (`fztype`).
    pub z_type: u8,
    /// Posting disposition (`fpost`).
    pub post: u8,
    /// Packed acquisition date (`fdate`); see [`Date`].
    pub date: i32,
    /// Resolution description text (`fres`).
    pub resolution: [u8; RESOLUTION_LEN],
    /// Source instrument description text (`fsource`).
    pub source: [u8; SOURCE_LEN],
    /// Peak point number for interferograms (`fpeakpt`).
    pub peak_point: i16,
    pub spare: [u8; SPARE_LEN],
    /// Free-form memo (`fcmnt`).
    pub comment: [u8; COMMENT_LEN],
    /// Custom axis label strings (`fcatxt`).
    pub axis_labels: [u8; AXIS_LABELS_LEN],
    /// Byte offset of the log block, 0 if absent (`flogoff`).
    pub log_offset: i32,
    /// Modification flag bits (`fmods`).
    pub modified: i32,
    /// Processing code (`fprocs`).
    pub processing: u8,
    /// Calibration level plus one (`flevel`).
    pub level: u8,
    /// Sub-method sample injection number (`fsampin`).
    pub sample_injection: i16,
    /// Floating data multiplier concentration factor (`ffactor`).
    pub factor: f32,
    /// Method file name (`fmethod`).
    pub method: [u8; METHOD_LEN],
    /// Z subfile increment for even Z multifiles (`fzinc`).
    pub z_increment: f32,
    /// Number of W planes (`fwplanes`).
    pub w_planes: i32,
    /// W plane increment (`fwinc`).
    pub w_increment: f32,
    /// W axis units code (`fwtype`).
    pub w_type: u8,
    pub reserved: [u8; RESERVED_LEN],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            flags: 0,
            version: VERSION_NEW_LSB,
            experiment: 0,
            exponent: FLOAT_EXPONENT,
            point_count: 0,
            first_x: 0.0,
            last_x: 0.0,
            subfile_count: 1,
            x_type: 0,
            y_type: 0,
            z_type: 0,
            post: 0,
            date: 0,
            resolution: [0; RESOLUTION_LEN],
            source: [0; SOURCE_LEN],
            peak_point: 0,
            spare: [0; SPARE_LEN],
            comment: [0; COMMENT_LEN],
            axis_labels: [0; AXIS_LABELS_LEN],
            log_offset: 0,
            modified: 0,
            processing: 0,
            level: 0,
            sample_injection: 0,
            factor: 0.0,
            method: [0; METHOD_LEN],
            z_increment: 0.0,
            w_planes: 0,
            w_increment: 0.0,
            w_type: 0,
            reserved: [0; RESERVED_LEN],
        }
    }
}

impl Header {
    /// Decode the header from the first [`HEADER_SIZE`] bytes of `buf`.
    ///
    /// Bytes past the header are ignored. Fails with
    /// [`SpcError::TruncatedInput`](super::SpcError::TruncatedInput) when
    /// `buf` is shorter than the header.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(buf);
        // Check the whole block up front so a short file reports the header,
        // not whichever field happened to run off the end.
        r.take("header", HEADER_SIZE)?;
        let mut r = ByteReader::new(&buf[..HEADER_SIZE]);

        Ok(Self {
            flags: r.u8("flags")?,
            version: r.u8("version")?,
            experiment: r.u8("experiment")?,
            exponent: r.u8("exponent")?,
            point_count: r.i32("point_count")?,
            first_x: r.f64("first_x")?,
            last_x: r.f64("last_x")?,
            subfile_count: r.i32("subfile_count")?,
            x_type: r.u8("x_type")?,
            y_type: r.u8("y_type")?,
            z_type: r.u8("z_type")?,
            post: r.u8("post")?,
            date: r.i32("date")?,
            resolution: r.array("resolution")?,
            source: r.array("source")?,
            peak_point: r.i16("peak_point")?,
            spare: r.array("spare")?,
            comment: r.array("comment")?,
            axis_labels: r.array("axis_labels")?,
            log_offset: r.i32("log_offset")?,
            modified: r.i32("modified")?,
            processing: r.u8("processing")?,
            level: r.u8("level")?,
            sample_injection: r.i16("sample_injection")?,
            factor: r.f32("factor")?,
            method: r.array("method")?,
            z_increment: r.f32("z_increment")?,
            w_planes: r.i32("w_planes")?,
            w_increment: r.f32("w_increment")?,
            w_type: r.u8("w_type")?,
            reserved: r.array("reserved")?,
        })
    }

    /// Encode the header. Field values are written as-is.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        let mut w = SliceWriter::new(&mut buf);

        w.u8(self.flags);
        w.u8(self.version);
        w.u8(self.experiment);
        w.u8(self.exponent);
        w.i32(self.point_count);
        w.f64(self.first_x);
        w.f64(self.last_x);
        w.i32(self.subfile_count);
        w.u8(self.x_type);
        w.u8(self.y_type);
        w.u8(self.z_type);
        w.u8(self.post);
        w.i32(self.date);
        w.bytes(&self.resolution);
        w.bytes(&self.source);
        w.i16(self.peak_point);
        w.bytes(&self.spare);
        w.bytes(&self.comment);
        w.bytes(&self.axis_labels);
        w.i32(self.log_offset);
        w.i32(self.modified);
        w.u8(self.processing);
        w.u8(self.level);
        w.i16(self.sample_injection);
        w.f32(self.factor);
        w.bytes(&self.method);
        w.f32(self.z_increment);
        w.i32(self.w_planes);
        w.f32(self.w_increment);
        w.u8(self.w_type);
        w.bytes(&self.reserved);

        debug_assert_eq!(w.position(), HEADER_SIZE);
        buf
    }

    #[inline]
    pub fn flag_set(&self) -> FlagSet {
        FlagSet::from_byte(self.flags)
    }

    #[inline]
    pub fn date(&self) -> Date {
        Date::unpack(self.date)
    }

    pub fn set_date(&mut self, date: Date) {
        self.date = date.pack();
    }

    /// Y samples are stored as floats rather than scaled integers.
    #[inline]
    pub fn is_plain_float(&self) -> bool {
        self.exponent == FLOAT_EXPONENT
    }

    /// Comment text up to the first NUL, decoded lossily.
    pub fn comment_text(&self) -> String {
        fixed_text(&self.comment)
    }

    /// Replace the comment, truncating to the field width.
    pub fn set_comment(&mut self, text: &str) {
        self.comment = [0; COMMENT_LEN];
        let bytes = text.as_bytes();
        let n = bytes.len().min(COMMENT_LEN);
        self.comment[..n].copy_from_slice(&bytes[..n]);
    }

    pub fn source_text(&self) -> String {
        fixed_text(&self.source)
    }

    pub fn method_text(&self) -> String {
        fixed_text(&self.method)
    }
}

/// NUL-terminated text from a fixed-width field.
fn fixed_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
