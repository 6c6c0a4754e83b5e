// Take a look at the license at the top of the repository in the LICENSE file.

use std::fs::File;
use std::path::Path;

use crate::{
    BIOS_SCAN_RANGE, ChecksumPolicy, EntryPoint, Error, find_entry_point, read_entry_point_at,
    read_memory_table,
};

pub(crate) const DEV_MEM: &str = "/dev/mem";

// Reads the entry point and the table from a physical memory device. If the entry point address
// isn't known, the legacy BIOS area is scanned for it.
pub(crate) fn acquire(
    path: &Path,
    entry_point_addr: Option<u64>,
    policy: ChecksumPolicy,
) -> Result<(EntryPoint, Vec<u8>), Error> {
    let mut mem = File::open(path)
        .map_err(|e| Error::io(format!("failed to open `{}`", path.display()), e))?;

    let addr = match entry_point_addr {
        Some(addr) => addr,
        None => find_entry_point(&mut mem, BIOS_SCAN_RANGE)?,
    };
    let entry_point = read_entry_point_at(&mut mem, addr, policy)?;
    let table = read_memory_table(&mut mem, &entry_point)?;
    Ok((entry_point, table))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn check_missing_device() {
        let dir = tempfile::tempdir().expect("failed to create temporary directory");
        match acquire(&dir.path().join("mem"), None, ChecksumPolicy::Strict) {
            Err(Error::AcquisitionFailed { reason, source }) => {
                assert!(reason.contains("failed to open"));
                assert!(source.is_some());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn check_known_address() {
        #[rustfmt::skip]
        let mut ep = [
            b'_', b'S', b'M', b'3', b'_',
            0x00,
            0x18,
            0x03, 0x05, 0x00,
            0x01,
            0x00,
            0x06, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        ep[5] = ep.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)).wrapping_neg();

        let mut mem = vec![0u8; 0x40];
        mem[0x10..0x10 + ep.len()].copy_from_slice(&ep);
        mem[0x30..0x36].copy_from_slice(&[127, 4, 0, 0, 0, 0]);

        let dir = tempfile::tempdir().expect("failed to create temporary directory");
        let path = dir.path().join("mem");
        std::fs::write(&path, &mem).expect("failed to write memory image");

        let (entry_point, table) =
            acquire(&path, Some(0x10), ChecksumPolicy::Strict).expect("failed to acquire");
        assert_eq!(entry_point.version().minor, 5);
        assert_eq!(table, [127, 4, 0, 0, 0, 0]);
    }
}
