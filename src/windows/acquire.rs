// Take a look at the license at the top of the repository in the LICENSE file.

use windows::Win32::System::SystemInformation::{FIRMWARE_TABLE_PROVIDER, GetSystemFirmwareTable};

use crate::{ChecksumPolicy, EntryPoint, Error, parse_raw_smbios_data};

// Windows doesn't give access to the real entry point: the table comes with a small header
// holding the version and the length instead, so there is no checksum to check.
pub(crate) fn acquire(_policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    let data = get_smbios_table()?;
    let (entry_point, table) = parse_raw_smbios_data(&data)?;
    Ok((EntryPoint::Windows(entry_point), table.to_vec()))
}

// Get the SMBIOS table using the WinAPI.
fn get_smbios_table() -> Result<Vec<u8>, Error> {
    const PROVIDER: FIRMWARE_TABLE_PROVIDER = FIRMWARE_TABLE_PROVIDER(u32::from_be_bytes(*b"RSMB"));

    let size = unsafe { GetSystemFirmwareTable(PROVIDER, 0, None) };
    if size == 0 {
        return Err(Error::io(
            "GetSystemFirmwareTable failed to return the SMBIOS table size",
            std::io::Error::last_os_error(),
        ));
    }

    let mut buffer = vec![0u8; size as usize];

    let res = unsafe { GetSystemFirmwareTable(PROVIDER, 0, Some(&mut buffer)) };
    if res == 0 {
        return Err(Error::io(
            "GetSystemFirmwareTable failed to return the SMBIOS table",
            std::io::Error::last_os_error(),
        ));
    }
    fit_to_written(&mut buffer, res)?;

    Ok(buffer)
}

// The table might have changed between both calls. If it grew, nothing was written in `buffer`.
fn fit_to_written(buffer: &mut Vec<u8>, written: u32) -> Result<(), Error> {
    let written = written as usize;
    if written > buffer.len() {
        return Err(Error::acquisition(format!(
            "SMBIOS table grew from {} to {} bytes while being retrieved",
            buffer.len(),
            written,
        )));
    }
    buffer.truncate(written);
    Ok(())
}
