// Take a look at the license at the top of the repository in the LICENSE file.

use crate::common::error::{ChecksumRegion, Error};

// Sum of all bytes, modulo 256.
pub(crate) fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

pub(crate) fn verify(bytes: &[u8], region: ChecksumRegion) -> Result<(), Error> {
    match sum(bytes) {
        0 => Ok(()),
        sum => Err(Error::ChecksumMismatch { region, sum }),
    }
}

// Value to store in a checksum byte (currently zero) so the region sums to 0.
#[cfg(test)]
pub(crate) fn complement(bytes: &[u8]) -> u8 {
    sum(bytes).wrapping_neg()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn check_sum_wraps() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[0xff, 0x01]), 0);
        assert_eq!(sum(&[0x80, 0x80, 0x05]), 5);
    }

    #[test]
    fn check_complement() {
        let mut bytes = [0x5f, 0x53, 0x4d, 0x5f, 0x00, 0x1f];
        bytes[4] = complement(&bytes);
        assert!(verify(&bytes, ChecksumRegion::EntryPoint).is_ok());

        bytes[0] ^= 1;
        match verify(&bytes, ChecksumRegion::EntryPoint) {
            Err(Error::ChecksumMismatch {
                region: ChecksumRegion::EntryPoint,
                sum,
            }) => assert_ne!(sum, 0),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
