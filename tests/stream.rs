// Take a look at the license at the top of the repository in the LICENSE file.

use smbios_stream::{
    Decoder, EntryPoint, Error, Smbios, open_table_stream, parse_entry_point,
    parse_raw_smbios_data,
};
use std::io::{BufRead, Read};

fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

// 64-bit entry point declaring a table of at most `max_size` bytes.
fn entry_point_64(max_size: u32) -> EntryPoint {
    let mut buf = [0u8; 24];
    buf[..5].copy_from_slice(b"_SM3_");
    buf[6] = 0x18;
    buf[7] = 3;
    buf[0x0a] = 1;
    buf[0x0c..0x10].copy_from_slice(&max_size.to_le_bytes());
    buf[5] = sum(&buf).wrapping_neg();
    parse_entry_point(&buf).unwrap()
}

#[rustfmt::skip]
const TABLE: &[u8] = &[
    0x00, 0x05, 0x00, 0x00, 0x01, b'v', b'e', b'n', b'd', b'o', b'r', 0x00, 0x00,
    0x01, 0x04, 0x01, 0x00, 0x00, 0x00,
    127, 0x04, 0x02, 0x00, 0x00, 0x00,
];

#[test]
fn test_stream_never_passes_declared_length() {
    let mut raw = TABLE.to_vec();
    raw.extend_from_slice(&[0xaa; 16]);

    let ep = parse_raw_smbios_data(
        &[&[0, 2, 8, 0, TABLE.len() as u8, 0, 0, 0][..], &raw].concat(),
    )
    .map(|(ep, _)| EntryPoint::Windows(ep))
    .unwrap();

    let mut stream = open_table_stream(&raw, &ep).unwrap();
    let mut data = Vec::new();
    stream.read_to_end(&mut data).unwrap();
    assert_eq!(data, TABLE);
    assert_eq!(stream.read(&mut [0; 8]).unwrap(), 0);
}

#[test]
fn test_stream_bounded_by_available_bytes() {
    let ep = entry_point_64(0x1000);
    let stream = open_table_stream(TABLE, &ep).unwrap();
    assert_eq!(stream.len(), TABLE.len());

    let structures = Decoder::new(stream).decode().unwrap();
    assert_eq!(
        structures.iter().map(|s| s.header.kind).collect::<Vec<_>>(),
        [0, 1, 127]
    );
    assert_eq!(structures[0].string(1), Some(&b"vendor"[..]));
}

#[test]
fn test_stream_buf_read() {
    let ep = entry_point_64(0x1000);
    let mut stream = open_table_stream(TABLE, &ep).unwrap();

    let mut header = Vec::new();
    // The table starts with a type 0 structure.
    stream.read_until(0, &mut header).unwrap();
    assert_eq!(header, [0x00]);
    assert_eq!(stream.position(), 1);

    stream.consume(12);
    assert_eq!(stream.remaining(), TABLE.len() - 13);
    assert_eq!(stream.fill_buf().unwrap()[0], 0x01);
}

#[test]
fn test_stream_too_short() {
    let ep = entry_point_64(3);
    assert!(matches!(
        open_table_stream(TABLE, &ep),
        Err(Error::TruncatedInput { needed: 4, got: 3 })
    ));
    let ep = entry_point_64(0x1000);
    assert!(matches!(
        open_table_stream(&[], &ep),
        Err(Error::TruncatedInput { needed: 4, got: 0 })
    ));
}

#[test]
fn test_streams_are_independent() {
    let smbios = Smbios::new(entry_point_64(0x1000), TABLE.to_vec());

    let mut first = smbios.stream().unwrap();
    first.consume(10);
    let second = smbios.stream().unwrap();
    assert_eq!(second.position(), 0);
    assert_eq!(smbios.structures().unwrap().len(), 3);
}
