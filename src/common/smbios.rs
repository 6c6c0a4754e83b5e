// Take a look at the license at the top of the repository in the LICENSE file.

use crate::common::decoder::{Decoder, Structure};
use crate::common::entry_point::{ChecksumPolicy, EntryPoint};
use crate::common::error::Error;
use crate::common::stream::{TableStream, open_table_stream};

/// SMBIOS data retrieved from the current system: the entry point and the raw structure table.
///
/// The way the data is retrieved depends on the platform:
///
/// * Linux: `/sys/firmware/dmi/tables`, or `/dev/mem` if not available.
/// * macOS: the `AppleSMBIOS` IOKit service.
/// * FreeBSD: `/dev/mem`, using the `hint.smbios.0.mem` kernel environment variable if set.
/// * Windows: `GetSystemFirmwareTable`.
///
/// On other platforms, [`Smbios::acquire`] always fails. Reading `/dev/mem` usually requires
/// elevated privileges.
///
/// ```no_run
/// use smbios_stream::Smbios;
///
/// let smbios = Smbios::acquire().expect("failed to retrieve SMBIOS data");
/// println!("SMBIOS {}", smbios.entry_point().version());
/// for structure in smbios.structures().expect("failed to decode SMBIOS table") {
///     println!("type {} ({} bytes)", structure.header.kind, structure.size());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Smbios {
    entry_point: EntryPoint,
    table: Vec<u8>,
}

impl Smbios {
    /// Retrieves the SMBIOS data of the current system, rejecting entry points with invalid
    /// checksums.
    pub fn acquire() -> Result<Self, Error> {
        Self::acquire_with(ChecksumPolicy::Strict)
    }

    /// Retrieves the SMBIOS data of the current system, handling entry point checksum
    /// mismatches according to `policy`.
    pub fn acquire_with(policy: ChecksumPolicy) -> Result<Self, Error> {
        let (entry_point, table) = crate::sys::acquire(policy)?;
        Ok(Self::new(entry_point, table))
    }

    /// Creates a new [`Smbios`] from data retrieved some other way.
    pub fn new(entry_point: EntryPoint, table: Vec<u8>) -> Self {
        Self { entry_point, table }
    }

    /// Returns the entry point.
    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }

    /// Returns the raw table bytes, as retrieved.
    ///
    /// They might go past the table length declared by the entry point.
    pub fn table(&self) -> &[u8] {
        &self.table
    }

    /// Returns a new stream over the table bytes.
    pub fn stream(&self) -> Result<TableStream<'_>, Error> {
        open_table_stream(&self.table, &self.entry_point)
    }

    /// Splits the table into its structures.
    pub fn structures(&self) -> Result<Vec<Structure>, Error> {
        Decoder::new(self.stream()?).decode()
    }
}
