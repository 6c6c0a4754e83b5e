// Take a look at the license at the top of the repository in the LICENSE file.

use std::path::Path;

use super::utils::{get_kenv_var, parse_address};
use crate::unix::dev_mem::{self, DEV_MEM};
use crate::{ChecksumPolicy, EntryPoint, Error};

pub(crate) fn acquire(policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    // Set by the kernel when it found the entry point while booting.
    let addr = get_kenv_var(b"hint.smbios.0.mem\0").and_then(|value| parse_address(&value));
    if addr.is_none() {
        smbios_debug!("`hint.smbios.0.mem` not set, scanning `{}`", DEV_MEM);
    }
    dev_mem::acquire(Path::new(DEV_MEM), addr, policy)
}
