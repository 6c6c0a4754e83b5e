// Take a look at the license at the top of the repository in the LICENSE file.

use std::io::{self, BufRead, BufReader, Read};

use crate::common::error::Error;

// Every structure starts with a 4 bytes header.
pub(crate) const HEADER_LEN: usize = 4;
// Type of the structure marking the end of the table.
const END_OF_TABLE: u8 = 127;

/// Header of an SMBIOS structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Type of the structure (`0` for BIOS information, `17` for memory devices, etc).
    pub kind: u8,
    /// Length of the formatted area, header included.
    pub length: u8,
    /// Handle of the structure.
    pub handle: u16,
}

impl Header {
    fn parse(buf: [u8; HEADER_LEN]) -> Self {
        Self {
            kind: buf[0],
            length: buf[1],
            handle: u16::from_le_bytes([buf[2], buf[3]]),
        }
    }

    /// Returns `true` if this header marks the end of the structure table.
    pub fn is_end_of_table(&self) -> bool {
        self.kind == END_OF_TABLE
    }
}

/// A structure of the SMBIOS table, split into its byte spans.
///
/// The content of the formatted area isn't interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Structure {
    /// Header of the structure.
    pub header: Header,
    /// Formatted area, without the header.
    pub formatted: Vec<u8>,
    /// Strings following the formatted area, without their NUL terminators.
    pub strings: Vec<Vec<u8>>,
}

impl Structure {
    /// Returns the string referenced by `index` in the formatted area.
    ///
    /// Indexes start at 1, `0` meaning that no string was provided.
    pub fn string(&self, index: u8) -> Option<&[u8]> {
        let index = (index as usize).checked_sub(1)?;
        self.strings.get(index).map(Vec::as_slice)
    }

    /// Returns the total number of bytes this structure takes in the table, string set
    /// included.
    pub fn size(&self) -> usize {
        let strings = if self.strings.is_empty() {
            // An empty string set is still terminated by two NUL bytes.
            2
        } else {
            self.strings.iter().map(|s| s.len() + 1).sum::<usize>() + 1
        };
        self.header.length as usize + strings
    }
}

/// Splits an SMBIOS structure table into [`Structure`]s.
///
/// It stops after the end-of-table structure (type 127), or at the end of the stream when it
/// falls exactly between two structures.
///
/// ```
/// use smbios_stream::Decoder;
///
/// let table: &[u8] = &[
///     0x01, 0x05, 0x01, 0x00, 0xff, b'a', b'b', 0x00, 0x00,
///     127, 0x04, 0x02, 0x00, 0x00, 0x00,
/// ];
/// let structures = Decoder::new(table).decode().unwrap();
/// assert_eq!(structures.len(), 2);
/// assert_eq!(structures[0].string(1), Some(&b"ab"[..]));
/// assert!(structures[1].header.is_end_of_table());
/// ```
pub struct Decoder<R: Read> {
    stream: BufReader<R>,
    done: bool,
}

impl<R: Read> Decoder<R> {
    /// Creates a new [`Decoder`] reading from `stream`.
    pub fn new(stream: R) -> Self {
        Self {
            stream: BufReader::new(stream),
            done: false,
        }
    }

    /// Decodes all remaining structures.
    pub fn decode(&mut self) -> Result<Vec<Structure>, Error> {
        self.collect()
    }

    fn read_header(&mut self) -> Result<Option<Header>, Error> {
        let mut buf = [0; HEADER_LEN];
        match read_fully(&mut self.stream, &mut buf)? {
            0 => Ok(None),
            HEADER_LEN => Ok(Some(Header::parse(buf))),
            got => Err(Error::TruncatedInput {
                needed: HEADER_LEN,
                got,
            }),
        }
    }

    fn read_structure(&mut self, header: Header) -> Result<Structure, Error> {
        let length = header.length as usize;
        if length < HEADER_LEN {
            return Err(Error::InvalidFormat(format!(
                "structure {:#06x} (type {}) declares a length of {}, smaller than its header",
                header.handle, header.kind, length,
            )));
        }

        let mut formatted = vec![0; length - HEADER_LEN];
        let got = read_fully(&mut self.stream, &mut formatted)?;
        if got != formatted.len() {
            return Err(Error::TruncatedInput {
                needed: length,
                got: HEADER_LEN + got,
            });
        }

        // The string set ends with the first two consecutive NUL bytes.
        let mut set = Vec::new();
        loop {
            let n = self
                .stream
                .read_until(0, &mut set)
                .map_err(|e| Error::io("failed to read SMBIOS structure strings", e))?;
            if n == 0 || set.last() != Some(&0) {
                return Err(Error::TruncatedInput {
                    needed: length + set.len() + 1,
                    got: length + set.len(),
                });
            }
            if set.len() >= 2 && set[set.len() - 2] == 0 {
                break;
            }
        }

        let strings = set[..set.len() - 2]
            .split(|&b| b == 0)
            .filter(|s| !s.is_empty())
            .map(<[u8]>::to_vec)
            .collect();

        Ok(Structure {
            header,
            formatted,
            strings,
        })
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Structure, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let res = match self.read_header() {
            Ok(Some(header)) => self.read_structure(header),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e),
        };

        match res {
            Ok(ref structure) if !structure.header.is_end_of_table() => {}
            _ => self.done = true,
        }
        Some(res)
    }
}

// Like `read_exact` but returns how many bytes could be read instead of failing at the end of
// the stream.
fn read_fully<R: Read>(stream: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut read = 0;
    while read < buf.len() {
        match stream.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io("failed to read SMBIOS structure", e)),
        }
    }
    Ok(read)
}
