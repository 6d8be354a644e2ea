// File-level helpers around the in-memory SPC codec.
//
// `read_spc()` / `write_spc()` move whole files between disk and `SpcFile`,
// optionally computing SHA-256 checksums (feature-gated behind `file-io`).
// With the `csv` feature, spectra can be exported to and imported from
// two-column `x,y` text. `decode_files()` decodes a batch of paths, on a
// rayon pool when the `parallel` feature is enabled.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::spc::{self, DecodeOptions, SpcError, SpcFile};
#[cfg(feature = "csv")]
use crate::spc::Spectrum;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Size and checksum of a file read or written by this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    /// File size in bytes.
    pub bytes: u64,
    /// SHA-256 of the file contents (if `file-io` feature is enabled).
    pub sha256: Option<[u8; 32]>,
}

impl FileStats {
    fn of(buf: &[u8]) -> Self {
        Self {
            bytes: buf.len() as u64,
            sha256: sha256(buf),
        }
    }

    /// Lowercase hex form of the checksum.
    pub fn sha256_hex(&self) -> Option<String> {
        self.sha256
            .map(|digest| digest.iter().map(|b| format!("{b:02x}")).collect())
    }
}

#[cfg(feature = "file-io")]
fn sha256(buf: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(buf).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_buf: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The file is not a readable SPC file, or the spectrum cannot be written.
    #[error("{0}")]
    Spc(#[from] SpcError),
    /// CSV reader/writer failure.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    CsvFormat(#[source] csv::Error),
    /// A CSV row that is not an `x,y` pair of numbers.
    #[error("CSV error: {0}")]
    Csv(String),
}

#[cfg(feature = "csv")]
impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        Self::CsvFormat(e)
    }
}

// ---------------------------------------------------------------------------
// SPC files
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Read and decode an SPC file.
pub fn read_spc(path: &Path) -> Result<SpcFile, IoError> {
    read_spc_with_options(path, &DecodeOptions::default()).map(|(file, _)| file)
}

/// Read and decode an SPC file, also returning its size and checksum.
pub fn read_spc_with_options(
    path: &Path,
    opts: &DecodeOptions,
) -> Result<(SpcFile, FileStats), IoError> {
    let buf = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", buf.len(), path.display());
    let file = spc::decode_with_options(&buf, opts)?;
    Ok((file, FileStats::of(&buf)))
}

/// Encode `file` and write it to `path`, replacing any existing file.
pub fn write_spc(path: &Path, file: &SpcFile) -> Result<FileStats, IoError> {
    let buf = spc::encode(file)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    writer.write_all(&buf)?;
    writer.flush()?;
    log::debug!("wrote {} bytes to {}", buf.len(), path.display());
    Ok(FileStats::of(&buf))
}

// ---------------------------------------------------------------------------
// Batch decoding
// ---------------------------------------------------------------------------

/// Decode every file in `paths`. A failure affects only its own entry.
///
/// Results come back in input order.
pub fn decode_files<P>(
    paths: &[P],
    opts: &DecodeOptions,
) -> Vec<(PathBuf, Result<SpcFile, IoError>)>
where
    P: AsRef<Path> + Sync,
{
    let decode_one = |p: &P| {
        let path = p.as_ref().to_path_buf();
        let result = read_spc_with_options(&path, opts).map(|(file, _)| file);
        if let Err(e) = &result {
            log::warn!("{}: {e}", path.display());
        }
        (path, result)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths.par_iter().map(decode_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(decode_one).collect()
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Formatting options for [`write_csv`].
#[cfg(feature = "csv")]
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Emit an `x,y` header line first.
    pub header_row: bool,
}

#[cfg(feature = "csv")]
impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            header_row: false,
        }
    }
}

/// Write `spectrum` to `w` as `x,y` lines.
#[cfg(feature = "csv")]
pub fn write_csv_to<W: Write>(w: W, spectrum: &Spectrum, opts: &CsvOptions) -> Result<(), IoError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w);

    if opts.header_row {
        out.write_record(["x", "y"])?;
    }
    let prec = opts.precision;
    for (x, y) in spectrum.iter() {
        out.write_record([format!("{x:.prec$}"), format!("{y:.prec$}")])?;
    }
    out.flush()?;
    Ok(())
}

/// Write `spectrum` to a CSV file at `path`.
#[cfg(feature = "csv")]
pub fn write_csv(path: &Path, spectrum: &Spectrum, opts: &CsvOptions) -> Result<(), IoError> {
    let writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    write_csv_to(writer, spectrum, opts)
}

/// Parse `x,y` rows from `r`. A first row that is not numeric is treated as
/// a header and skipped.
#[cfg(feature = "csv")]
pub fn read_csv_from<R: io::Read>(r: R) -> Result<Spectrum, IoError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(r);

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(i as u64 + 1, |p| p.line());
        if record.len() != 2 {
            return Err(IoError::Csv(format!(
                "line {line}: expected 2 columns, found {}",
                record.len()
            )));
        }
        match (record[0].parse::<f32>(), record[1].parse::<f32>()) {
            (Ok(xv), Ok(yv)) => {
                x.push(xv);
                y.push(yv);
            }
            _ if i == 0 => log::debug!("skipping CSV header {:?}", record.as_slice()),
            _ => {
                return Err(IoError::Csv(format!(
                    "line {line}: not a number pair: {},{}",
                    &record[0], &record[1]
                )));
            }
        }
    }
    Ok(Spectrum::new(x, y)?)
}

/// Read a two-column CSV file into a spectrum.
#[cfg(feature = "csv")]
pub fn read_csv(path: &Path) -> Result<Spectrum, IoError> {
    read_csv_from(File::open(path)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
