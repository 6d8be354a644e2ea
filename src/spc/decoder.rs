// Whole-file SPC decoder.
//
// Progression: main header, flag interpretation, data block (X, sub-header,
// Y), then the log header directly after Y when `log_offset` is non-zero.
// Any failure aborts the decode; no partially built `SpcFile` escapes.

use log::{debug, trace, warn};

use super::error::{Result, SpcError};
use super::file::SpcFile;
use super::header::Header;
use super::loghdr::LogHeader;
use super::samples;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for [`decode_with_options`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Decode the log block header when `Header::log_offset` is non-zero.
    /// The block is read right after the Y samples.
    pub read_log_header: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            read_log_header: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a complete single-spectrum SPC file held in memory.
pub fn decode(buf: &[u8]) -> Result<SpcFile> {
    decode_with_options(buf, &DecodeOptions::default())
}

/// Decode with custom options.
pub fn decode_with_options(buf: &[u8], opts: &DecodeOptions) -> Result<SpcFile> {
    let header = Header::decode(buf)?;
    let flags = header.flag_set();

    debug!("file is {} bytes long", buf.len());
    debug!(
        "{} points, exponent {}, {} subfile(s), y type {}, log offset {}",
        header.point_count, header.exponent, header.subfile_count, header.y_type, header.log_offset
    );
    trace!("flag byte {:#04x}", header.flags);
    for line in flags.describe() {
        trace!("flag: {line}");
    }

    if flags.multifile() {
        warn!(
            "multifile SPC with {} subfiles is not supported",
            header.subfile_count
        );
        return Err(SpcError::unsupported("multifile SPC not implemented"));
    }

    let data = samples::decode_single(buf, &header)?;
    for line in data.sub_header.sub_flags().describe() {
        trace!("sub-flag: {line}");
    }

    let log_header = if header.log_offset != 0 && opts.read_log_header {
        Some(read_log_header(buf, &header, data.end)?)
    } else {
        None
    };

    Ok(SpcFile {
        header,
        sub_header: Some(data.sub_header),
        log_header,
        spectrum: data.spectrum,
    })
}

/// Read the log header that follows the data block.
///
/// `log_offset` only says whether a log block exists; the block itself is
/// taken from the running position, like every other section.
fn read_log_header(buf: &[u8], header: &Header, data_end: usize) -> Result<LogHeader> {
    if usize::try_from(header.log_offset).ok() != Some(data_end) {
        warn!(
            "log offset {} does not match the end of the data block at {data_end}",
            header.log_offset
        );
    }

    let (log, _) = LogHeader::decode(buf, data_end)?;
    debug!(
        "log header: size {}, space {}, text offset {}, binary size {}, binary spacing {}",
        log.size, log.space, log.text_offset, log.binary_size, log.binary_spacing
    );
    Ok(log)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::bytes::extend_f32;
    use crate::spc::flags::FlagSet;
    use crate::spc::header::HEADER_SIZE;
    use crate::spc::loghdr::LOGHEADER_SIZE;
    use crate::spc::subheader::{SUBHEADER_SIZE, SubHeader};

    fn build(header: &Header, x: &[f32], y: &[f32], log: Option<&LogHeader>) -> Vec<u8> {
        let mut buf = header.encode().to_vec();
        if header.flag_set().x_values_included() {
            extend_f32(&mut buf, x);
        }
        buf.extend_from_slice(&SubHeader::default().encode());
        extend_f32(&mut buf, y);
        if let Some(log) = log {
            buf.extend_from_slice(&log.encode());
        }
        buf
    }

    fn xy_header(n: i32) -> Header {
        Header {
            flags: FlagSet::X_VALUES_INCLUDED.as_byte(),
            point_count: n,
            ..Default::default()
        }
    }

    #[test]
    fn decode_without_log() {
        let header = xy_header(3);
        let buf = build(&header, &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], None);
        let file = decode(&buf).unwrap();
        assert_eq!(file.header, header);
        assert_eq!(file.spectrum.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(file.spectrum.y(), &[4.0, 5.0, 6.0]);
        assert!(file.sub_header.is_some());
        assert!(file.log_header.is_none());
    }

    #[test]
    fn decode_with_log_header() {
        let mut header = xy_header(2);
        header.log_offset = (HEADER_SIZE + 8 + SUBHEADER_SIZE + 8) as i32;
        let log = LogHeader {
            size: 128,
            space: 256,
            text_offset: 64,
            ..Default::default()
        };
        let buf = build(&header, &[1.0, 2.0], &[3.0, 4.0], Some(&log));

        let file = decode(&buf).unwrap();
        assert_eq!(file.log_header, Some(log));

        let skipped = decode_with_options(
            &buf,
            &DecodeOptions {
                read_log_header: false,
            },
        )
        .unwrap();
        assert!(skipped.log_header.is_none());
    }

    #[test]
    fn missing_log_block_is_truncated() {
        let mut header = xy_header(1);
        header.log_offset = (HEADER_SIZE + 4 + SUBHEADER_SIZE + 4) as i32;
        let buf = build(&header, &[1.0], &[2.0], None);
        let err = decode(&buf).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn log_header_follows_data_regardless_of_offset() {
        let log = LogHeader {
            size: 777,
            space: 888,
            text_offset: 64,
            ..Default::default()
        };
        for offset in [1, -5, -(LOGHEADER_SIZE as i32), 100_000] {
            let mut header = xy_header(2);
            header.log_offset = offset;
            let buf = build(&header, &[1.0, 2.0], &[3.0, 4.0], Some(&log));
            let file = decode(&buf).unwrap();
            assert_eq!(file.log_header, Some(log.clone()), "offset {offset}");
            assert_eq!(file.spectrum.y(), &[3.0, 4.0]);
        }
    }

    #[test]
    fn short_file_is_truncated() {
        for len in [0, 1, 100, HEADER_SIZE - 1] {
            let buf = vec![0u8; len];
            assert!(decode(&buf).unwrap_err().is_truncated(), "len {len}");
        }
    }

    #[test]
    fn multifile_reports_unsupported() {
        let header = Header {
            flags: (FlagSet::MULTIFILE | FlagSet::X_VALUES_INCLUDED).as_byte(),
            point_count: 10,
            subfile_count: 4,
            ..Default::default()
        };
        let err = decode(&header.encode()).unwrap_err();
        assert!(matches!(err, SpcError::Unsupported(_)));
        assert_eq!(err.to_string(), "unsupported: multifile SPC not implemented");
    }
}
