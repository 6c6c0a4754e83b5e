// Take a look at the license at the top of the repository in the LICENSE file.

use std::io::{self, BufRead, Read};

use crate::common::decoder::HEADER_LEN;
use crate::common::entry_point::EntryPoint;
use crate::common::error::Error;

/// Forward-only reader over the structure table bytes.
///
/// It never returns bytes past the table length resolved from the entry point. Once the end is
/// reached, reads return `Ok(0)`. There is no way to rewind it: to read the table again, create
/// a new stream with [`open_table_stream`].
///
/// ```
/// use smbios_stream::{open_table_stream, parse_raw_smbios_data};
/// use std::io::Read;
///
/// let raw = [0x00, 0x03, 0x04, 0x00, 0x06, 0x00, 0x00, 0x00, 127, 4, 0, 0, 0, 0, 0xff];
/// let (entry_point, table) = parse_raw_smbios_data(&raw).unwrap();
/// let entry_point = smbios_stream::EntryPoint::Windows(entry_point);
///
/// let mut stream = open_table_stream(table, &entry_point).unwrap();
/// let mut data = Vec::new();
/// stream.read_to_end(&mut data).unwrap();
/// assert_eq!(data, [127, 4, 0, 0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct TableStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TableStream<'a> {
    /// Returns the number of bytes this stream will yield in total.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the stream is bounded to zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes already consumed.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl Read for TableStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for TableStream<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.data[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.data.len());
    }
}

/// Wraps `raw` into a [`TableStream`] bounded by the table length of `entry_point`.
///
/// The bound is the smallest of the declared length and `raw.len()`: a firmware may declare a
/// bigger table than what is really there. [`Error::TruncatedInput`] is returned if what is left
/// can't even hold a structure header.
pub fn open_table_stream<'a>(
    raw: &'a [u8],
    entry_point: &EntryPoint,
) -> Result<TableStream<'a>, Error> {
    let table = entry_point.table_for(raw.len());
    if table.length < HEADER_LEN {
        return Err(Error::TruncatedInput {
            needed: HEADER_LEN,
            got: table.length,
        });
    }

    Ok(TableStream {
        data: &raw[..table.length],
        pos: 0,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::entry_point::WindowsEntryPoint;

    fn entry_point(length: u32) -> EntryPoint {
        EntryPoint::Windows(WindowsEntryPoint {
            used_20_calling_method: 0,
            major: 3,
            minor: 0,
            dmi_revision: 0,
            length,
        })
    }

    #[test]
    fn check_bounded_by_declared_length() {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut stream = open_table_stream(&raw, &entry_point(5)).unwrap();
        assert_eq!(stream.len(), 5);

        let mut buf = [0; 3];
        assert_eq!(stream.read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[4, 5]);
        assert_eq!(stream.position(), 5);
        assert_eq!(stream.remaining(), 0);
        // End of stream isn't an error.
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn check_bounded_by_acquired_length() {
        let raw = [1, 2, 3, 4, 5, 6];
        let mut stream = open_table_stream(&raw, &entry_point(u32::MAX)).unwrap();
        assert_eq!(stream.len(), raw.len());

        let mut data = Vec::new();
        stream.read_to_end(&mut data).unwrap();
        assert_eq!(data, raw);
    }

    #[test]
    fn check_too_short() {
        assert!(matches!(
            open_table_stream(&[1, 2, 3], &entry_point(100)),
            Err(Error::TruncatedInput { needed: 4, got: 3 })
        ));
        assert!(matches!(
            open_table_stream(&[1, 2, 3, 4, 5], &entry_point(2)),
            Err(Error::TruncatedInput { needed: 4, got: 2 })
        ));
        assert!(open_table_stream(&[1, 2, 3, 4], &entry_point(4)).is_ok());
    }

    #[test]
    fn check_consume_saturates() {
        let raw = [1, 2, 3, 4];
        let mut stream = open_table_stream(&raw, &entry_point(4)).unwrap();
        stream.consume(10);
        assert_eq!(stream.position(), 4);
        assert!(stream.fill_buf().unwrap().is_empty());
    }
}
