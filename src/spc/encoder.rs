// SPC writer.
//
// Every file is written in one fixed form: X values included, float Y
// samples, no log block. Before serialization the header copy gets
//
//   exponent   = 128   (float Y)
//   flags      = 0x80  (X_VALUES_INCLUDED only)
//   log_offset = 0
//
// so re-encoding a file that used scaled integers, 16-bit precision or a
// log block does not preserve those. Output order: header, X, sub-header, Y.

use std::io::Write;

use super::bytes::extend_f32;
use super::error::{Result, SpcError};
use super::file::SpcFile;
use super::flags::FlagSet;
use super::header::{FLOAT_EXPONENT, HEADER_SIZE, Header};
use super::samples;
use super::subheader::SUBHEADER_SIZE;

/// Header that will actually be written for `file`.
pub fn output_header(file: &SpcFile) -> Header {
    Header {
        exponent: FLOAT_EXPONENT,
        flags: FlagSet::X_VALUES_INCLUDED.as_byte(),
        log_offset: 0,
        ..file.header.clone()
    }
}

/// Size in bytes of the encoded form of `file`.
pub fn encoded_len(file: &SpcFile) -> usize {
    HEADER_SIZE + SUBHEADER_SIZE + file.spectrum.len() * 8
}

/// Encode `file` into a new buffer.
pub fn encode(file: &SpcFile) -> Result<Vec<u8>> {
    check_point_count(file)?;

    let header = output_header(file);
    let sub_header = file.sub_header.unwrap_or_default();
    if file.log_header.is_some() {
        log::debug!("log header present but not written");
    }

    let mut out = Vec::with_capacity(encoded_len(file));
    out.extend_from_slice(&header.encode());
    extend_f32(&mut out, file.spectrum.x());
    out.extend_from_slice(&sub_header.encode());
    extend_f32(&mut out, file.spectrum.y());

    debug_assert_eq!(out.len(), encoded_len(file));
    Ok(out)
}

/// Encode `file` and write it to `w`. Returns the number of bytes written.
pub fn encode_into<W: Write>(w: &mut W, file: &SpcFile) -> Result<u64> {
    let buf = encode(file)?;
    w.write_all(&buf)?;
    Ok(buf.len() as u64)
}

fn check_point_count(file: &SpcFile) -> Result<()> {
    let declared = samples::point_count(&file.header)?;
    if declared != file.spectrum.len() {
        return Err(SpcError::invalid_layout(format!(
            "header declares {declared} points but spectrum has {}",
            file.spectrum.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
