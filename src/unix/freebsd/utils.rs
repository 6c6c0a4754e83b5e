// Take a look at the license at the top of the repository in the LICENSE file.

// `name` must be NUL terminated.
pub(crate) fn get_kenv_var(name: &[u8]) -> Option<String> {
    let mut buf: [libc::c_char; libc::KENV_MVALLEN as usize] = [0; libc::KENV_MVALLEN as usize];

    let size = unsafe {
        libc::kenv(
            libc::KENV_GET as _,
            name.as_ptr() as _,
            buf.as_mut_ptr() as _,
            buf.len() as _,
        ) as isize
    };

    // returns a strictly negative number in case of error
    // (see: https://man.freebsd.org/cgi/man.cgi?query=kenv&sektion=2&manpath=FreeBSD+15.0-CURRENT)
    if size < 0 {
        return None;
    }

    let bytes = buf[..size as usize]
        .iter()
        .map(|&c| c as u8)
        .take_while(|&c| c != 0)
        .collect::<Vec<_>>();
    String::from_utf8(bytes).ok()
}

// Parses addresses like `0xf0000`, as the kernel writes them.
pub(crate) fn parse_address(value: &str) -> Option<u64> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16).ok()
}
