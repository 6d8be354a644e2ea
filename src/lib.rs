//! spcfile: reader and writer for Galactic Industries SPC spectral files.
//!
//! The crate provides:
//! - A pure-Rust codec for single-spectrum SPC files (`spc`)
//! - File-oriented helpers, CSV conversion and batch decoding (`io`)
//! - An optional CLI (`cli` feature)
//!
//! Multifile SPC (several spectra in one file) is detected and rejected
//! with [`spc::SpcError::Unsupported`].
//!
//! # Quick Start
//!
//! ```
//! use spcfile::spc::{self, SpcFile};
//!
//! let x = vec![400.0, 401.0, 402.0];
//! let y = vec![0.5, 1.25, 0.75];
//! let file = SpcFile::from_xy(x, y).unwrap();
//!
//! let bytes = spc::encode(&file).unwrap();
//! let decoded = spc::decode(&bytes).unwrap();
//! assert_eq!(decoded.spectrum, file.spectrum);
//! ```

pub mod io;
pub mod spc;

#[cfg(feature = "cli")]
pub mod cli;
