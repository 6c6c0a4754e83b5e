// Take a look at the license at the top of the repository in the LICENSE file.

#[cfg(feature = "debug")]
#[doc(hidden)]
#[allow(unused)]
macro_rules! smbios_debug {
    ($($x:tt)*) => {{
        eprintln!($($x)*);
    }}
}

#[cfg(not(feature = "debug"))]
#[doc(hidden)]
#[allow(unused)]
macro_rules! smbios_debug {
    ($($x:tt)*) => {{}};
}

// Reads a little-endian integer out of a byte slice whose length was checked beforehand.
macro_rules! read_le {
    ($ty:ty, $buf:expr, $offset:expr) => {{
        let mut raw = [0u8; std::mem::size_of::<$ty>()];
        raw.copy_from_slice(&$buf[$offset..$offset + std::mem::size_of::<$ty>()]);
        <$ty>::from_le_bytes(raw)
    }};
}
