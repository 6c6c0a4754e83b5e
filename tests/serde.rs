// Take a look at the license at the top of the repository in the LICENSE file.

#![cfg(feature = "serde")]

use smbios_stream::{Decoder, EntryPoint, Version, WindowsEntryPoint};

#[test]
fn test_serde_version() {
    let value = serde_json::to_value(Version::new(3, 4, 0)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "major": 3, "minor": 4, "revision": 0 })
    );
}

#[test]
fn test_serde_entry_point() {
    let ep = EntryPoint::Windows(WindowsEntryPoint {
        used_20_calling_method: 0,
        major: 3,
        minor: 3,
        dmi_revision: 0,
        length: 0x1234,
    });

    let values = match serde_json::to_value(&ep) {
        Ok(serde_json::Value::Object(values)) => values,
        other => panic!("expected object, found `{other:?}`"),
    };
    match values.get("Windows") {
        Some(serde_json::Value::Object(fields)) => {
            assert_eq!(fields.get("length"), Some(&serde_json::json!(0x1234)));
        }
        value => panic!("expected an object, found `{value:?}`"),
    }
    assert_eq!(
        serde_json::to_value(ep.table()).unwrap(),
        serde_json::json!({ "address": 0, "length": 0x1234 })
    );
}

#[test]
fn test_serde_structure() {
    let table: &[u8] = &[0x01, 0x05, 0x08, 0x00, 0x01, b'x', 0xff, 0x00, 0x00];
    let structures = Decoder::new(table).decode().unwrap();

    let value = serde_json::to_value(&structures[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "header": { "kind": 1, "length": 5, "handle": 8 },
            "formatted": [1],
            "strings": ["x\u{fffd}"],
        })
    );
}
