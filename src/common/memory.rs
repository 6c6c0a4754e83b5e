// Take a look at the license at the top of the repository in the LICENSE file.

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use crate::common::entry_point::{
    ChecksumPolicy, EntryPoint, SIGNATURE_32, SIGNATURE_64, parse_entry_point_with,
};
use crate::common::error::Error;

/// Physical memory range where legacy BIOSes put the entry point.
pub const BIOS_SCAN_RANGE: Range<u64> = 0x000f_0000..0x0010_0000;
// Entry points are aligned on 16 bytes.
const PARAGRAPH_SIZE: usize = 16;
const MAX_INITIAL_CAPACITY: usize = u16::MAX as usize;

/// Looks for an entry point signature in `range`, one 16 bytes paragraph at a time, and returns
/// its address.
///
/// Candidates that don't hold a valid entry point (a stray `_SM_` in a BIOS image for example)
/// are skipped. If no valid one is found, the address of the first candidate is returned so the
/// caller can still parse it with [`ChecksumPolicy::Warn`].
///
/// `mem` is expected to be a view of the physical memory (like `/dev/mem`), or anything else
/// addressed the same way.
///
/// ```
/// use smbios_stream::find_entry_point;
/// use std::io::Cursor;
///
/// let mut mem = vec![0xff; 64];
/// mem[32..36].copy_from_slice(b"_SM_");
/// assert_eq!(find_entry_point(&mut Cursor::new(mem), 0..64).unwrap(), 32);
/// ```
pub fn find_entry_point<R: Read + Seek>(mem: &mut R, range: Range<u64>) -> Result<u64, Error> {
    mem.seek(SeekFrom::Start(range.start))
        .map_err(|e| Error::io(format!("failed to seek to {:#x}", range.start), e))?;

    let mut buf = [0; PARAGRAPH_SIZE];
    let mut addr = range.start;
    let mut first_candidate = None;
    while addr < range.end {
        if let Err(_e) = mem.read_exact(&mut buf) {
            smbios_debug!("stopped looking for the SMBIOS entry point at {:#x}: {}", addr, _e);
            break;
        }
        let next = addr + PARAGRAPH_SIZE as u64;
        if buf.starts_with(SIGNATURE_64) || buf.starts_with(SIGNATURE_32) {
            match read_entry_point_at(mem, addr, ChecksumPolicy::Strict) {
                Ok(_) => return Ok(addr),
                Err(_e) => {
                    smbios_debug!("skipping SMBIOS entry point candidate at {:#x}: {}", addr, _e);
                    first_candidate.get_or_insert(addr);
                }
            }
            mem.seek(SeekFrom::Start(next))
                .map_err(|e| Error::io(format!("failed to seek to {next:#x}"), e))?;
        }
        addr = next;
    }

    first_candidate.ok_or_else(|| {
        Error::acquisition(format!(
            "no SMBIOS entry point found between {:#x} and {:#x}",
            range.start, range.end
        ))
    })
}

/// Reads and parses the entry point located at `addr` in `mem`.
///
/// Up to [`EntryPoint::BUFFER_LEN`] bytes are read, fewer if `mem` ends before.
pub fn read_entry_point_at<R: Read + Seek>(
    mem: &mut R,
    addr: u64,
    policy: ChecksumPolicy,
) -> Result<EntryPoint, Error> {
    mem.seek(SeekFrom::Start(addr))
        .map_err(|e| Error::io(format!("failed to seek to entry point at {addr:#x}"), e))?;

    let mut buf = Vec::with_capacity(EntryPoint::BUFFER_LEN);
    mem.take(EntryPoint::BUFFER_LEN as u64)
        .read_to_end(&mut buf)
        .map_err(|e| Error::io(format!("failed to read entry point at {addr:#x}"), e))?;
    parse_entry_point_with(&buf, policy)
}

/// Reads the structure table described by `entry_point` from `mem`.
///
/// At most the declared table length is read: the result is shorter if `mem` ends before.
pub fn read_memory_table<R: Read + Seek>(
    mem: &mut R,
    entry_point: &EntryPoint,
) -> Result<Vec<u8>, Error> {
    if let EntryPoint::Windows(_) = entry_point {
        return Err(Error::InvalidFormat(
            "this entry point doesn't locate a table in physical memory".to_owned(),
        ));
    }

    let addr = entry_point.physical_address();
    let length = entry_point.table().length;
    mem.seek(SeekFrom::Start(addr))
        .map_err(|e| Error::io(format!("failed to seek to SMBIOS table at {addr:#x}"), e))?;

    // The declared length is only an upper bound for 64-bit entry points.
    let mut table = Vec::with_capacity(length.min(MAX_INITIAL_CAPACITY));
    mem.take(length as u64)
        .read_to_end(&mut table)
        .map_err(|e| Error::io(format!("failed to read SMBIOS table at {addr:#x}"), e))?;
    if table.len() < length {
        smbios_debug!(
            "SMBIOS table at {:#x} declared as {} bytes, only {} could be read",
            addr,
            length,
            table.len(),
        );
    }
    Ok(table)
}
