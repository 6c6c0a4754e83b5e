// Take a look at the license at the top of the repository in the LICENSE file.

use std::fmt;
use std::io;

/// Region of an entry point covered by a checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumRegion {
    /// The whole entry point structure (both the 32-bit and the 64-bit layouts).
    EntryPoint,
    /// The 15 bytes starting at the `_DMI_` intermediate anchor of a 32-bit entry point.
    IntermediateAnchor,
}

impl fmt::Display for ChecksumRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EntryPoint => "entry point",
            Self::IntermediateAnchor => "intermediate anchor",
        })
    }
}

/// Errors returned while parsing, streaming or acquiring SMBIOS data.
///
/// None of them is retried by this crate: whether a checksum mismatch is fatal or not is up to
/// the caller (see [`ChecksumPolicy`][crate::ChecksumPolicy]).
#[derive(Debug)]
pub enum Error {
    /// The data doesn't follow the expected layout: unknown signature, unexpected intermediate
    /// anchor or inconsistent declared sizes.
    InvalidFormat(String),
    /// The bytes of a checksummed region don't add up to zero (modulo 256).
    ChecksumMismatch {
        /// Region which failed validation.
        region: ChecksumRegion,
        /// Sum of the region bytes, `0` when valid.
        sum: u8,
    },
    /// Not enough bytes were provided for the detected layout.
    TruncatedInput {
        /// Minimum number of bytes required.
        needed: usize,
        /// Number of bytes actually available.
        got: usize,
    },
    /// The platform specific retrieval of the SMBIOS data failed.
    AcquisitionFailed {
        /// Message describing what failed.
        reason: String,
        /// Underlying I/O error, if any.
        source: Option<io::Error>,
    },
}

impl Error {
    pub(crate) fn acquisition(reason: impl Into<String>) -> Self {
        Self::AcquisitionFailed {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn io(reason: impl Into<String>, source: io::Error) -> Self {
        Self::AcquisitionFailed {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Returns `true` if this is a [`Error::ChecksumMismatch`].
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(reason) => write!(f, "invalid SMBIOS format: {reason}"),
            Self::ChecksumMismatch { region, sum } => {
                write!(f, "{region} checksum mismatch: bytes sum to {sum:#04x} instead of 0")
            }
            Self::TruncatedInput { needed, got } => {
                write!(f, "truncated input: expected at least {needed} bytes, got {got}")
            }
            Self::AcquisitionFailed {
                reason,
                source: Some(source),
            } => write!(f, "failed to acquire SMBIOS data: {reason}: {source}"),
            Self::AcquisitionFailed {
                reason,
                source: None,
            } => write!(f, "failed to acquire SMBIOS data: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AcquisitionFailed {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}

/// A [`Result`][std::result::Result] using [`Error`] as error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn check_display() {
        assert_eq!(
            Error::ChecksumMismatch {
                region: ChecksumRegion::IntermediateAnchor,
                sum: 1,
            }
            .to_string(),
            "intermediate anchor checksum mismatch: bytes sum to 0x01 instead of 0",
        );
        assert_eq!(
            Error::TruncatedInput { needed: 24, got: 5 }.to_string(),
            "truncated input: expected at least 24 bytes, got 5",
        );
        assert_eq!(
            Error::acquisition("AppleSMBIOS service is unreachable").to_string(),
            "failed to acquire SMBIOS data: AppleSMBIOS service is unreachable",
        );
    }

    #[test]
    fn check_source() {
        let err = Error::io(
            "/sys/firmware/dmi/tables/DMI",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.source().is_some());
        assert!(!err.is_checksum_mismatch());
        assert!(Error::InvalidFormat(String::new()).source().is_none());
    }
}
