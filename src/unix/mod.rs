// Take a look at the license at the top of the repository in the LICENSE file.

cfg_if! {
    if #[cfg(target_os = "macos")] {
        pub(crate) mod apple;
        pub(crate) use apple as sys;
    } else if #[cfg(any(target_os = "linux", target_os = "android"))] {
        pub(crate) mod linux;
        pub(crate) use linux as sys;
    } else if #[cfg(target_os = "freebsd")] {
        pub(crate) mod freebsd;
        pub(crate) use freebsd as sys;
    } else {
        compile_error!("Invalid cfg!");
    }
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub(crate) mod dev_mem;
