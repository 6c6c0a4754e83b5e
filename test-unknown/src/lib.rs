// Take a look at the license at the top of the repository in the LICENSE file.

use smbios_stream::{ChecksumPolicy, Smbios};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn tester() -> bool {
    Smbios::acquire_with(ChecksumPolicy::Warn).is_ok()
}
