// Error type shared by every SPC codec operation.

use thiserror::Error;

/// Result alias used throughout the `spc` module.
pub type Result<T, E = SpcError> = std::result::Result<T, E>;

/// Failure modes of SPC decoding and encoding.
///
/// Every variant is terminal for the file being processed: no partially
/// decoded [`SpcFile`](super::SpcFile) is ever returned alongside one.
#[derive(Debug, Error)]
pub enum SpcError {
    /// The buffer ended before a fixed-size field or sample array did.
    #[error(
        "truncated input: {what} needs {needed} bytes at offset {offset}, {available} available"
    )]
    TruncatedInput {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The file uses a feature this codec does not implement.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Field values contradict each other or the data they describe.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Writing an encoded file to a sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpcError {
    pub(crate) fn truncated(
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    ) -> Self {
        Self::TruncatedInput {
            what,
            offset,
            needed,
            available,
        }
    }

    pub(crate) fn invalid_layout<S: Into<String>>(msg: S) -> Self {
        Self::InvalidLayout(msg.into())
    }

    pub(crate) fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    /// True for [`SpcError::TruncatedInput`].
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_message_names_field() {
        let e = SpcError::truncated("header", 0, 512, 100);
        assert_eq!(
            e.to_string(),
            "truncated input: header needs 512 bytes at offset 0, 100 available"
        );
        assert!(e.is_truncated());
    }

    #[test]
    fn io_errors_convert() {
        let e: SpcError = std::io::Error::other("disk full").into();
        assert!(matches!(e, SpcError::Io(_)));
        assert!(!e.is_truncated());
    }
}
