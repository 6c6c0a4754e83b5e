// Take a look at the license at the top of the repository in the LICENSE file.

pub(crate) mod checksum;
pub(crate) mod decoder;
pub(crate) mod entry_point;
pub(crate) mod error;
pub(crate) mod memory;
pub(crate) mod smbios;
pub(crate) mod stream;
