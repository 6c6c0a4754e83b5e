// Take a look at the license at the top of the repository in the LICENSE file.

use std::fmt;

use crate::common::checksum;
use crate::common::error::{ChecksumRegion, Error};

// Anchor strings of both entry point layouts. The 64-bit one is checked first.
pub(crate) const SIGNATURE_64: &[u8; 5] = b"_SM3_";
pub(crate) const SIGNATURE_32: &[u8; 4] = b"_SM_";
const INTERMEDIATE_ANCHOR: &[u8; 5] = b"_DMI_";

// Fixed sizes, as stored in the `length` field of each layout.
const LEN_32: usize = 0x1f;
const LEN_64: usize = 0x18;
// The intermediate anchor and its checksummed region start at this offset in a 32-bit entry point.
const INTERMEDIATE_OFFSET: usize = 0x10;
// Header returned by `GetSystemFirmwareTable('RSMB')` in front of the structure table.
const RAW_SMBIOS_DATA_LEN: usize = 8;

/// SMBIOS version declared by an entry point.
///
/// Versions are ordered, so version gates can be written as comparisons:
///
/// ```
/// use smbios_stream::Version;
///
/// let v = Version::new(3, 2, 0);
/// assert!(v >= Version::new(2, 6, 0));
/// assert!(v.is_at_least(3, 0));
/// assert_eq!(v.to_string(), "3.2.0");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Revision. Always `0` for 32-bit entry points, the document revision for 64-bit ones.
    pub revision: u8,
}

impl Version {
    /// Creates a new [`Version`].
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    /// Returns `true` if this version is `major.minor` or later, ignoring the revision.
    pub fn is_at_least(&self, major: u8, minor: u8) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

/// Location and size of the structure table, as returned by [`EntryPoint::table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table {
    /// For 32-bit entry points, the physical address written by the firmware. It is only an
    /// identity value once the table bytes are already in hand. `0` for the other variants since
    /// the table starts at the beginning of the acquired bytes.
    pub address: u64,
    /// Size of the table in bytes.
    pub length: usize,
}

/// Controls what happens when an entry point checksum doesn't match.
///
/// Format and truncation errors are always reported, whatever the policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumPolicy {
    /// A mismatch is returned as [`Error::ChecksumMismatch`].
    #[default]
    Strict,
    /// A mismatch is logged (with the `debug` feature) and the entry point is returned anyway.
    Warn,
}

impl ChecksumPolicy {
    fn apply(self, result: Result<(), Error>) -> Result<(), Error> {
        match (self, result) {
            (Self::Warn, Err(_e @ Error::ChecksumMismatch { .. })) => {
                smbios_debug!("ignoring SMBIOS entry point error: {}", _e);
                Ok(())
            }
            (_, result) => result,
        }
    }
}

/// The 32-bit (`_SM_`) entry point, used up to SMBIOS 2.x.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bits32 {
    /// Checksum of the whole entry point.
    pub checksum: u8,
    /// Length of the entry point, `0x1F`.
    pub length: u8,
    /// SMBIOS major version.
    pub major: u8,
    /// SMBIOS minor version.
    pub minor: u8,
    /// Size of the largest structure of the table.
    pub max_structure_size: u16,
    /// Entry point revision.
    pub entry_point_revision: u8,
    /// Formatted area, whose content depends on `entry_point_revision`.
    pub formatted_area: [u8; 5],
    /// Checksum of the intermediate (`_DMI_`) part.
    pub intermediate_checksum: u8,
    /// Total length of the structure table.
    pub structure_table_length: u16,
    /// Physical address of the structure table.
    pub structure_table_address: u32,
    /// Number of structures in the table.
    pub number_of_structures: u16,
    /// SMBIOS version encoded in BCD.
    pub bcd_revision: u8,
}

impl Bits32 {
    fn parse(buf: &[u8]) -> Result<(Self, Result<(), Error>), Error> {
        if buf.len() < LEN_32 {
            return Err(Error::TruncatedInput {
                needed: LEN_32,
                got: buf.len(),
            });
        }

        let length = buf[5];
        if length as usize != LEN_32 {
            return Err(Error::InvalidFormat(format!(
                "expected 32-bit entry point length {LEN_32:#04x}, got {length:#04x}"
            )));
        }
        let anchor = &buf[INTERMEDIATE_OFFSET..INTERMEDIATE_OFFSET + INTERMEDIATE_ANCHOR.len()];
        if anchor != INTERMEDIATE_ANCHOR {
            return Err(Error::InvalidFormat(format!(
                "expected intermediate anchor `_DMI_`, got {anchor:02x?}"
            )));
        }

        let checksums = checksum::verify(&buf[..LEN_32], ChecksumRegion::EntryPoint).and_then(
            |_| {
                checksum::verify(
                    &buf[INTERMEDIATE_OFFSET..LEN_32],
                    ChecksumRegion::IntermediateAnchor,
                )
            },
        );

        let mut formatted_area = [0; 5];
        formatted_area.copy_from_slice(&buf[0x0b..0x10]);

        let entry_point = Self {
            checksum: buf[4],
            length,
            major: buf[6],
            minor: buf[7],
            max_structure_size: read_le!(u16, buf, 0x08),
            entry_point_revision: buf[0x0a],
            formatted_area,
            intermediate_checksum: buf[0x15],
            structure_table_length: read_le!(u16, buf, 0x16),
            structure_table_address: read_le!(u32, buf, 0x18),
            number_of_structures: read_le!(u16, buf, 0x1c),
            bcd_revision: buf[0x1e],
        };
        Ok((entry_point, checksums))
    }

    /// Returns the declared SMBIOS version. The revision is always `0`.
    pub fn version(&self) -> Version {
        Version::new(self.major, self.minor, 0)
    }

    /// Returns the table address (as an opaque value) and its declared length.
    pub fn table(&self) -> Table {
        Table {
            address: self.structure_table_address as u64,
            length: self.structure_table_length as usize,
        }
    }
}

/// The 64-bit (`_SM3_`) entry point, used from SMBIOS 3.0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bits64 {
    /// Checksum of the whole entry point.
    pub checksum: u8,
    /// Length of the entry point, `0x18`.
    pub length: u8,
    /// SMBIOS major version.
    pub major: u8,
    /// SMBIOS minor version.
    pub minor: u8,
    /// SMBIOS document revision.
    pub docrev: u8,
    /// Entry point revision.
    pub entry_point_revision: u8,
    /// Reserved byte.
    pub reserved: u8,
    /// Upper bound of the structure table size. Firmwares are allowed to declare more than the
    /// actual size.
    pub structure_table_max_size: u32,
    /// Physical address of the structure table.
    pub structure_table_address: u64,
}

impl Bits64 {
    fn parse(buf: &[u8]) -> Result<(Self, Result<(), Error>), Error> {
        if buf.len() < LEN_64 {
            return Err(Error::TruncatedInput {
                needed: LEN_64,
                got: buf.len(),
            });
        }

        let length = buf[6];
        if length as usize != LEN_64 {
            return Err(Error::InvalidFormat(format!(
                "expected 64-bit entry point length {LEN_64:#04x}, got {length:#04x}"
            )));
        }

        let checksums = checksum::verify(&buf[..LEN_64], ChecksumRegion::EntryPoint);
        let entry_point = Self {
            checksum: buf[5],
            length,
            major: buf[7],
            minor: buf[8],
            docrev: buf[9],
            entry_point_revision: buf[0x0a],
            reserved: buf[0x0b],
            structure_table_max_size: read_le!(u32, buf, 0x0c),
            structure_table_address: read_le!(u64, buf, 0x10),
        };
        Ok((entry_point, checksums))
    }

    /// Returns the declared SMBIOS version, with the document revision.
    pub fn version(&self) -> Version {
        Version::new(self.major, self.minor, self.docrev)
    }

    /// Returns `0` and the declared maximum size of the table.
    ///
    /// The size is only an upper bound: use [`EntryPoint::table_for`] once the table bytes have
    /// been acquired.
    pub fn table(&self) -> Table {
        Table {
            address: 0,
            length: self.structure_table_max_size as usize,
        }
    }
}

/// Header prepended to the structure table by the Windows firmware table provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowsEntryPoint {
    /// Whether the 2.0 calling method was used.
    pub used_20_calling_method: u8,
    /// SMBIOS major version.
    pub major: u8,
    /// SMBIOS minor version.
    pub minor: u8,
    /// DMI revision.
    pub dmi_revision: u8,
    /// Length of the structure table.
    pub length: u32,
}

impl WindowsEntryPoint {
    /// Returns the declared SMBIOS version, with the DMI revision.
    pub fn version(&self) -> Version {
        Version::new(self.major, self.minor, self.dmi_revision)
    }

    /// Returns `0` and the length of the table.
    pub fn table(&self) -> Table {
        Table {
            address: 0,
            length: self.length as usize,
        }
    }
}

/// An SMBIOS entry point.
///
/// It is immutable once parsed and doesn't hold any system resource.
///
/// ```
/// use smbios_stream::{parse_entry_point, EntryPoint};
///
/// let buf = [
///     b'_', b'S', b'M', b'3', b'_', 0x86, 0x18, 0x03, 0x00, 0x00, 0x01, 0x00,
///     0x53, 0x09, 0x00, 0x00, 0xb0, 0xb3, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00,
/// ];
/// let entry_point = parse_entry_point(&buf).expect("invalid entry point");
/// assert!(matches!(entry_point, EntryPoint::Bits64(_)));
/// println!("SMBIOS {}: {:?}", entry_point.version(), entry_point.table());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// 32-bit entry point.
    Bits32(Bits32),
    /// 64-bit entry point.
    Bits64(Bits64),
    /// Header returned by Windows instead of a real entry point.
    Windows(WindowsEntryPoint),
}

impl EntryPoint {
    /// Size of the scratch buffer to hand to [`parse_entry_point`]. No entry point is bigger.
    pub const BUFFER_LEN: usize = 64;

    /// Returns the declared SMBIOS version.
    pub fn version(&self) -> Version {
        match self {
            Self::Bits32(ep) => ep.version(),
            Self::Bits64(ep) => ep.version(),
            Self::Windows(ep) => ep.version(),
        }
    }

    /// Returns the table location and its declared length.
    ///
    /// For 64-bit entry points, the length is an upper bound. Prefer [`EntryPoint::table_for`]
    /// once the table has been acquired.
    pub fn table(&self) -> Table {
        match self {
            Self::Bits32(ep) => ep.table(),
            Self::Bits64(ep) => ep.table(),
            Self::Windows(ep) => ep.table(),
        }
    }

    /// Same as [`EntryPoint::table`] but the length never exceeds `acquired_len`, the number of
    /// table bytes actually available.
    ///
    /// ```
    /// use smbios_stream::{EntryPoint, WindowsEntryPoint};
    ///
    /// let entry_point = EntryPoint::Windows(WindowsEntryPoint {
    ///     used_20_calling_method: 0,
    ///     major: 3,
    ///     minor: 4,
    ///     dmi_revision: 0,
    ///     length: 4096,
    /// });
    /// assert_eq!(entry_point.table_for(1024).length, 1024);
    /// assert_eq!(entry_point.table_for(8192).length, 4096);
    /// ```
    pub fn table_for(&self, acquired_len: usize) -> Table {
        let table = self.table();
        if table.length > acquired_len {
            smbios_debug!(
                "SMBIOS table declared as {} bytes but only {} are available, clamping",
                table.length,
                acquired_len,
            );
        }
        Table {
            length: table.length.min(acquired_len),
            ..table
        }
    }

    /// Returns the physical address of the structure table, as written by the firmware.
    ///
    /// Only meaningful when reading the table from physical memory. `0` for Windows.
    pub fn physical_address(&self) -> u64 {
        match self {
            Self::Bits32(ep) => ep.structure_table_address as u64,
            Self::Bits64(ep) => ep.structure_table_address,
            Self::Windows(_) => 0,
        }
    }
}

/// Parses an entry point out of `buf`, validating its checksums.
///
/// `buf` should be a [`EntryPoint::BUFFER_LEN`] bytes buffer; bytes after the entry point are
/// ignored. The 64-bit signature (`_SM3_`) is checked first, then the 32-bit one (`_SM_`).
///
/// This is equivalent to calling [`parse_entry_point_with`] with [`ChecksumPolicy::Strict`].
pub fn parse_entry_point(buf: &[u8]) -> Result<EntryPoint, Error> {
    parse_entry_point_with(buf, ChecksumPolicy::Strict)
}

/// Parses an entry point out of `buf`, handling checksum mismatches according to `policy`.
///
/// Once a signature matched, errors are never turned into an attempt to parse the other layout.
pub fn parse_entry_point_with(buf: &[u8], policy: ChecksumPolicy) -> Result<EntryPoint, Error> {
    if buf.starts_with(SIGNATURE_64) {
        let (ep, checksums) = Bits64::parse(buf)?;
        policy.apply(checksums)?;
        Ok(EntryPoint::Bits64(ep))
    } else if buf.starts_with(SIGNATURE_32) {
        let (ep, checksums) = Bits32::parse(buf)?;
        policy.apply(checksums)?;
        Ok(EntryPoint::Bits32(ep))
    } else if SIGNATURE_64.starts_with(buf) || SIGNATURE_32.starts_with(buf) {
        // Not enough bytes to tell which signature it is.
        Err(Error::TruncatedInput {
            needed: LEN_64,
            got: buf.len(),
        })
    } else {
        let len = buf.len().min(SIGNATURE_64.len());
        Err(Error::InvalidFormat(format!(
            "unknown entry point signature {:02x?}",
            &buf[..len]
        )))
    }
}

/// Splits the data returned by Windows' `GetSystemFirmwareTable('RSMB')` into its header and
/// the structure table.
///
/// The returned table never goes past the end of `buf`, even if the header declares more.
pub fn parse_raw_smbios_data(buf: &[u8]) -> Result<(WindowsEntryPoint, &[u8]), Error> {
    if buf.len() < RAW_SMBIOS_DATA_LEN {
        return Err(Error::TruncatedInput {
            needed: RAW_SMBIOS_DATA_LEN,
            got: buf.len(),
        });
    }

    let entry_point = WindowsEntryPoint {
        used_20_calling_method: buf[0],
        major: buf[1],
        minor: buf[2],
        dmi_revision: buf[3],
        length: read_le!(u32, buf, 4),
    };
    let data = &buf[RAW_SMBIOS_DATA_LEN..];
    let len = data.len().min(entry_point.length as usize);
    Ok((entry_point, &data[..len]))
}
