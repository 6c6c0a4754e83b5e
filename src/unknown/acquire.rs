// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{ChecksumPolicy, EntryPoint, Error};

pub(crate) fn acquire(_policy: ChecksumPolicy) -> Result<(EntryPoint, Vec<u8>), Error> {
    Err(Error::acquisition(
        "retrieving SMBIOS data is not supported on this platform",
    ))
}
