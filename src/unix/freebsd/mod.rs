// Take a look at the license at the top of the repository in the LICENSE file.

mod acquire;
mod utils;

pub(crate) use self::acquire::acquire;

/// Whether SMBIOS data can be retrieved on this platform.
pub const IS_SUPPORTED_SYSTEM: bool = true;
