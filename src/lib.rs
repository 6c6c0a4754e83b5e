// Take a look at the license at the top of the repository in the LICENSE file.

#![doc = include_str!("../README.md")]
#![allow(unknown_lints)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(clippy::upper_case_acronyms)]
#![allow(renamed_and_removed_lints)]

#[macro_use]
extern crate cfg_if;

#[macro_use]
mod macros;

cfg_if! {
    if #[cfg(any(feature = "unknown-ci", not(feature = "acquire")))] {
        // This is used in CI to check that the build for unknown targets is compiling fine.
        mod unknown;
        use crate::unknown as sys;
    } else if #[cfg(any(
        target_os = "macos",
        target_os = "linux", target_os = "android",
        target_os = "freebsd"))]
    {
        mod unix;
        use crate::unix::sys as sys;
    } else if #[cfg(windows)] {
        mod windows;
        use crate::windows as sys;
    } else {
        mod unknown;
        use crate::unknown as sys;
    }
}

pub use crate::common::decoder::{Decoder, Header, Structure};
pub use crate::common::entry_point::{
    Bits32, Bits64, ChecksumPolicy, EntryPoint, Table, Version, WindowsEntryPoint,
    parse_entry_point, parse_entry_point_with, parse_raw_smbios_data,
};
pub use crate::common::error::{ChecksumRegion, Error, Result};
pub use crate::common::memory::{
    BIOS_SCAN_RANGE, find_entry_point, read_entry_point_at, read_memory_table,
};
pub use crate::common::smbios::Smbios;
pub use crate::common::stream::{TableStream, open_table_stream};
pub use crate::sys::IS_SUPPORTED_SYSTEM;

mod common;
#[cfg(feature = "serde")]
mod serde;
