// Galactic Industries SPC spectral file format.
//
// Single-spectrum files only: multifile SPC is detected and rejected.
//
// # Modules
//
// - `bytes`     Bounds-checked little-endian reader and fixed-slice writer
// - `error`     `SpcError` and the crate-wide `Result` alias
// - `flags`     Main header flag byte and sub-header flag byte
// - `date`      Packed acquisition date (32-bit bitfield)
// - `header`    512-byte main header
// - `subheader` 32-byte per-spectrum sub-header
// - `loghdr`    64-byte log block header
// - `samples`   X generation, Y scaling, data block decoding
// - `file`      In-memory `SpcFile` and `Spectrum`
// - `decoder`   Whole-file decoding
// - `encoder`   Whole-file encoding (plain-float form)

pub mod bytes;
pub mod date;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod file;
pub mod flags;
pub mod header;
pub mod loghdr;
pub mod samples;
pub mod subheader;

// Re-export key types for convenience.
pub use date::Date;
pub use decoder::{DecodeOptions, decode, decode_with_options};
pub use encoder::{encode, encode_into, encoded_len};
pub use error::{Result, SpcError};
pub use file::{SpcFile, Spectrum};
pub use flags::{FlagSet, SubFlags};
pub use header::{FLOAT_EXPONENT, HEADER_SIZE, Header};
pub use loghdr::{LOGHEADER_SIZE, LogHeader};
pub use samples::linear_space;
pub use subheader::{SUBHEADER_SIZE, SubHeader};
