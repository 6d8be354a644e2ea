// Sample decoding for single-spectrum files.
//
// Data block layout after the 512-byte header:
//
//   [X: point_count × f32]   only if X_VALUES_INCLUDED
//   [sub-header: 32 bytes]
//   [Y: point_count × 4 bytes]
//
// Y is either f32 (exponent 128) or i32 scaled by 2^(exp - 32), or
// 2^(exp - 16) with Y16_BIT_PRECISION. The precision flag only changes the
// scaling exponent: samples are always read 32 bits wide.

use log::debug;

use super::bytes::ByteReader;
use super::error::{Result, SpcError};
use super::file::Spectrum;
use super::flags::FlagSet;
use super::header::{HEADER_SIZE, Header};
use super::subheader::SubHeader;

// ---------------------------------------------------------------------------
// X generation
// ---------------------------------------------------------------------------

/// `num` evenly spaced values from `start` towards `stop`.
///
/// With `endpoint`, the last value is `stop` (or just `start` when `num` is
/// 1); without it, `stop` is excluded. Arithmetic is `f32` throughout and
/// each sample is `start + i * step`.
pub fn linear_space(start: f32, stop: f32, num: usize, endpoint: bool) -> Vec<f32> {
    if num == 0 {
        return Vec::new();
    }
    let step = if endpoint {
        if num == 1 {
            return vec![start];
        }
        (stop - start) / (num - 1) as f32
    } else {
        (stop - start) / num as f32
    };
    (0..num).map(|i| start + i as f32 * step).collect()
}

// ---------------------------------------------------------------------------
// Y scaling
// ---------------------------------------------------------------------------

/// Multiplier applied to integer Y samples.
pub fn scale_factor(exponent: u8, y_16bit: bool) -> f32 {
    let bias = if y_16bit { 16 } else { 32 };
    2f64.powi(i32::from(exponent) - bias) as f32
}

/// Convert raw integer samples using the header exponent.
pub fn scale_samples(raw: &[i32], exponent: u8, y_16bit: bool) -> Vec<f32> {
    let factor = scale_factor(exponent, y_16bit);
    raw.iter().map(|&v| v as f32 * factor).collect()
}

// ---------------------------------------------------------------------------
// Single-spectrum decoding
// ---------------------------------------------------------------------------

/// Result of decoding the data block of a single-spectrum file.
#[derive(Debug, Clone)]
pub struct DecodedSamples {
    pub spectrum: Spectrum,
    pub sub_header: SubHeader,
    /// Offset just past the Y array.
    pub end: usize,
}

/// Number of points declared by the header, as a buffer length.
pub fn point_count(header: &Header) -> Result<usize> {
    usize::try_from(header.point_count).map_err(|_| {
        SpcError::invalid_layout(format!("negative point count {}", header.point_count))
    })
}

/// Read or generate X, read the sub-header, then read Y.
///
/// `buf` is the whole file; decoding starts right after the main header.
pub fn decode_single(buf: &[u8], header: &Header) -> Result<DecodedSamples> {
    let flags = header.flag_set();
    if flags.multifile() {
        return Err(SpcError::unsupported("multifile SPC not implemented"));
    }
    let n = point_count(header)?;
    let mut r = ByteReader::at(buf, HEADER_SIZE);

    let stored_x = if flags.x_values_included() {
        debug!("single spectrum with included X, {n} points");
        Some(r.f32_vec("X samples", n)?)
    } else {
        debug!(
            "single spectrum with generated X from {} to {}, {n} points",
            header.first_x, header.last_x
        );
        None
    };

    let (sub_header, pos) = SubHeader::decode(buf, r.position())?;
    debug!("sub-header read, position {pos}");
    let mut r = ByteReader::at(buf, pos);

    let y = if header.is_plain_float() {
        r.f32_vec("Y samples", n)?
    } else {
        let raw = r.i32_vec("Y samples", n)?;
        debug!(
            "scaling integer Y by 2^({} - {})",
            header.exponent,
            if flags.y_16bit_precision() { 16 } else { 32 }
        );
        scale_samples(&raw, header.exponent, flags.y_16bit_precision())
    };
    debug!("Y read, position {}", r.position());

    // Generated only once Y has been read, so `n` is bounded by the input.
    let x = stored_x
        .unwrap_or_else(|| linear_space(header.first_x as f32, header.last_x as f32, n, true));

    Ok(DecodedSamples {
        spectrum: Spectrum::new(x, y)?,
        sub_header,
        end: r.position(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
