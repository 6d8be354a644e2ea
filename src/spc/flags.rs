// SPC flag bytes.
//
// The main header carries one byte of file-type flags (`ftflgs`), each
// sub-header one byte of per-spectrum flags (`subflgs`). Both are plain
// bitfields; unknown bits are retained so that the raw byte round-trips.

use bitflags::bitflags;

bitflags! {
    /// File-type flags from header byte 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlagSet: u8 {
        /// Y integers were stored with 16-bit precision.
        const Y16_BIT_PRECISION = 1 << 0;
        /// Experiment extension is in use instead of the plain SPC layout.
        const EXPERIMENT_EXTENSION = 1 << 1;
        /// More than one spectrum is stored in the file.
        const MULTIFILE = 1 << 2;
        /// Multifile Z values are in random order.
        const RANDOM_Z = 1 << 3;
        /// Multifile Z values are ordered but not evenly spaced.
        const ORDERED_UNEVEN_Z = 1 << 4;
        /// Custom axis labels are stored in the header (obsolete).
        const CUSTOM_AXIS_LABELS = 1 << 5;
        /// Each multifile subfile carries its own X array.
        const PER_SUBFILE_X = 1 << 6;
        /// An explicit X array precedes the first sub-header.
        const X_VALUES_INCLUDED = 1 << 7;
    }
}

impl FlagSet {
    /// Interpret a raw flag byte. Every byte value is valid.
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self.bits()
    }

    #[inline]
    pub fn y_16bit_precision(self) -> bool {
        self.contains(Self::Y16_BIT_PRECISION)
    }

    #[inline]
    pub fn experiment_extension(self) -> bool {
        self.contains(Self::EXPERIMENT_EXTENSION)
    }

    #[inline]
    pub fn multifile(self) -> bool {
        self.contains(Self::MULTIFILE)
    }

    #[inline]
    pub fn random_z(self) -> bool {
        self.contains(Self::RANDOM_Z)
    }

    #[inline]
    pub fn ordered_uneven_z(self) -> bool {
        self.contains(Self::ORDERED_UNEVEN_Z)
    }

    #[inline]
    pub fn custom_axis_labels(self) -> bool {
        self.contains(Self::CUSTOM_AXIS_LABELS)
    }

    #[inline]
    pub fn per_subfile_x(self) -> bool {
        self.contains(Self::PER_SUBFILE_X)
    }

    #[inline]
    pub fn x_values_included(self) -> bool {
        self.contains(Self::X_VALUES_INCLUDED)
    }

    /// Human-readable report, one line per set flag.
    ///
    /// The X-source line is always present: a per-subfile X array takes
    /// precedence over a single X array, and with neither the X axis is
    /// generated from the header range.
    pub fn describe(self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.y_16bit_precision() {
            lines.push("Y data stored with 16-bit precision");
        }
        if self.experiment_extension() {
            lines.push("experiment extension in use");
        }
        if self.multifile() {
            lines.push("multifile");
        }
        if self.random_z() {
            lines.push("multifile Z values randomly ordered");
        }
        if self.ordered_uneven_z() {
            lines.push("multifile Z values ordered but uneven");
        }
        if self.custom_axis_labels() {
            lines.push("custom axis labels (obsolete)");
        }
        if self.per_subfile_x() {
            lines.push("each subfile has its own X array");
        } else if self.x_values_included() {
            lines.push("XY file, X values included");
        } else {
            lines.push("no X values given, X is generated");
        }
        lines
    }
}

bitflags! {
    /// Per-spectrum flags from sub-header byte 0.
    ///
    /// Only bits 0, 3 and 7 are interpreted. Bits 3 and 7 follow the
    /// historical reader and have not been checked against the vendor
    /// format reference.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SubFlags: u8 {
        /// Subfile changed since acquisition.
        const CHANGED = 1 << 0;
        /// Do not use the peak table file.
        const SKIP_PEAK_TABLE = 1 << 3;
        /// Subfile modified by arithmetic.
        const MODIFIED_BY_ARITHMETIC = 1 << 7;
    }
}

impl SubFlags {
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self.bits()
    }

    #[inline]
    pub fn changed(self) -> bool {
        self.contains(Self::CHANGED)
    }

    #[inline]
    pub fn skip_peak_table(self) -> bool {
        self.contains(Self::SKIP_PEAK_TABLE)
    }

    #[inline]
    pub fn modified_by_arithmetic(self) -> bool {
        self.contains(Self::MODIFIED_BY_ARITHMETIC)
    }

    pub fn describe(self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.changed() {
            lines.push("subfile changed");
        }
        if self.skip_peak_table() {
            lines.push("do not use peak table file");
        }
        if self.modified_by_arithmetic() {
            lines.push("subfile modified by arithmetic");
        }
        lines
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_matches_bit_table() {
        for b in 0..=255u8 {
            let f = FlagSet::from_byte(b);
            assert_eq!(f.y_16bit_precision(), b & 0x01 != 0, "byte {b:#04x}");
            assert_eq!(f.experiment_extension(), b & 0x02 != 0, "byte {b:#04x}");
            assert_eq!(f.multifile(), b & 0x04 != 0, "byte {b:#04x}");
            assert_eq!(f.random_z(), b & 0x08 != 0, "byte {b:#04x}");
            assert_eq!(f.ordered_uneven_z(), b & 0x10 != 0, "byte {b:#04x}");
            assert_eq!(f.custom_axis_labels(), b & 0x20 != 0, "byte {b:#04x}");
            assert_eq!(f.per_subfile_x(), b & 0x40 != 0, "byte {b:#04x}");
            assert_eq!(f.x_values_included(), b & 0x80 != 0, "byte {b:#04x}");
            assert_eq!(f.as_byte(), b);
        }
    }

    #[test]
    fn sub_flags_bit_positions() {
        for b in 0..=255u8 {
            let s = SubFlags::from_byte(b);
            assert_eq!(s.changed(), b & 0x01 != 0);
            assert_eq!(s.skip_peak_table(), b & 0x08 != 0);
            assert_eq!(s.modified_by_arithmetic(), b & 0x80 != 0);
            assert_eq!(s.as_byte(), b);
        }
    }

    #[test]
    fn describe_x_source() {
        assert_eq!(
            FlagSet::from_byte(0).describe(),
            vec!["no X values given, X is generated"]
        );
        assert_eq!(
            FlagSet::X_VALUES_INCLUDED.describe(),
            vec!["XY file, X values included"]
        );
        let both = FlagSet::PER_SUBFILE_X | FlagSet::X_VALUES_INCLUDED | FlagSet::MULTIFILE;
        assert_eq!(
            both.describe(),
            vec!["multifile", "each subfile has its own X array"]
        );
    }

    #[test]
    fn describe_sub_flags() {
        assert!(SubFlags::from_byte(0).describe().is_empty());
        assert_eq!(SubFlags::from_byte(0x89).describe().len(), 3);
    }
}
