// In-memory SPC file: header, optional sub-/log headers and the samples.

use super::error::{Result, SpcError};
use super::flags::FlagSet;
use super::header::{FLOAT_EXPONENT, Header};
use super::loghdr::LogHeader;
use super::subheader::SubHeader;

// ---------------------------------------------------------------------------
// Spectrum
// ---------------------------------------------------------------------------

/// Paired X/Y samples of one spectrum. Both arrays always have equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl Spectrum {
    /// Pair up `x` and `y`. Fails with `InvalidLayout` if lengths differ.
    pub fn new(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(SpcError::invalid_layout(format!(
                "X has {} samples but Y has {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    #[inline]
    pub fn x(&self) -> &[f32] {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &[f32] {
        &self.y
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate `(x, y)` pairs in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f32, f32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Smallest and largest Y value, ignoring NaNs. `None` when empty or all NaN.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        self.y
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Give up ownership of the sample arrays.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// SpcFile
// ---------------------------------------------------------------------------

/// A decoded single-spectrum SPC file, or one prepared for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SpcFile {
    pub header: Header,
    pub sub_header: Option<SubHeader>,
    pub log_header: Option<LogHeader>,
    pub spectrum: Spectrum,
}

impl SpcFile {
    /// Build a file around `x`/`y` with a header describing them: point
    /// count, X range, X values included, float Y samples.
    pub fn from_xy(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        let spectrum = Spectrum::new(x, y)?;
        let point_count = i32::try_from(spectrum.len()).map_err(|_| {
            SpcError::invalid_layout(format!("{} samples exceed i32 range", spectrum.len()))
        })?;

        let header = Header {
            flags: FlagSet::X_VALUES_INCLUDED.as_byte(),
            exponent: FLOAT_EXPONENT,
            point_count,
            first_x: spectrum.x().first().copied().unwrap_or_default() as f64,
            last_x: spectrum.x().last().copied().unwrap_or_default() as f64,
            ..Default::default()
        };

        Ok(Self {
            header,
            sub_header: Some(SubHeader::default()),
            log_header: None,
            spectrum,
        })
    }

    #[inline]
    pub fn flag_set(&self) -> FlagSet {
        self.header.flag_set()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
