// Packed acquisition date (`fdate`).
//
// Layout of the 32-bit value, most significant first:
//
//   year: bits 20..32   month: 16..20   day: 11..16   hour: 6..11   minute: 0..6
//
// Fields are extracted with non-overlapping masks (4/5/5/6 bits below the
// year). Packing is a plain shift-and-add with no range checks, so an
// out-of-range field silently carries into its neighbour.

/// Calendar date as stored in an SPC header. Seconds are not recorded.
///
/// The field masks are 4/5/5/6 bits wide. Historical readers mask month
/// with `& 31` and day/hour with `& 63`, which overlaps the neighbouring
/// field; dates with an odd month, day or hour unpack differently there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
}

const MONTH_MASK: i32 = 0x0F;
const DAY_MASK: i32 = 0x1F;
const HOUR_MASK: i32 = 0x1F;
const MINUTE_MASK: i32 = 0x3F;

impl Date {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Split a packed date into its fields.
    ///
    /// The year is an arithmetic shift with no mask, so a value with the
    /// sign bit set yields a negative year.
    pub fn unpack(value: i32) -> Self {
        Self {
            year: value >> 20,
            month: (value >> 16) & MONTH_MASK,
            day: (value >> 11) & DAY_MASK,
            hour: (value >> 6) & HOUR_MASK,
            minute: value & MINUTE_MASK,
        }
    }

    /// Pack the fields into a single value. Does not validate ranges.
    pub fn pack(&self) -> i32 {
        self.year
            .wrapping_shl(20)
            .wrapping_add(self.month.wrapping_shl(16))
            .wrapping_add(self.day.wrapping_shl(11))
            .wrapping_add(self.hour.wrapping_shl(6))
            .wrapping_add(self.minute)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
