// Take a look at the license at the top of the repository in the LICENSE file.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::unix::dev_mem::{self, DEV_MEM};
use crate::{ChecksumPolicy, EntryPoint, Error, parse_entry_point_with};

const SYSFS_DMI_TABLES: &str = "/sys/firmware/dmi/tables";
const ENTRY_POINT_FILE: &str = "smbios_entry_point";
const TABLE_FILE: &str = "DMI";

pub(crate) fn acquire(policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    let dir = Path::new(SYSFS_DMI_TABLES);
    if dir.join(ENTRY_POINT_FILE).exists() {
        return acquire_from_sysfs(dir, policy);
    }

    smbios_debug!(
        "`{}` not found, looking for the SMBIOS entry point in `{}`",
        dir.join(ENTRY_POINT_FILE).display(),
        DEV_MEM,
    );
    dev_mem::acquire(Path::new(DEV_MEM), None, policy)
}

fn acquire_from_sysfs(dir: &Path, policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    let path = dir.join(ENTRY_POINT_FILE);
    let file = File::open(&path)
        .map_err(|e| Error::io(format!("failed to open `{}`", path.display()), e))?;

    let mut buf = Vec::with_capacity(EntryPoint::BUFFER_LEN);
    file.take(EntryPoint::BUFFER_LEN as u64)
        .read_to_end(&mut buf)
        .map_err(|e| Error::io(format!("failed to read `{}`", path.display()), e))?;
    let entry_point = parse_entry_point_with(&buf, policy)?;

    let path = dir.join(TABLE_FILE);
    let table =
        fs::read(&path).map_err(|e| Error::io(format!("failed to read `{}`", path.display()), e))?;
    Ok((entry_point, table))
}
