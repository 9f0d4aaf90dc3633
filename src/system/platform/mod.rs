use super::cpu::CpuTimes;

pub trait PlatformExtensions {
    /// Cumulative busy/idle counters, or `None` where the OS does not expose them.
    fn cpu_times() -> Option<CpuTimes>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported {
    use super::{CpuTimes, PlatformExtensions};

    pub struct Platform;

    impl PlatformExtensions for Platform {
        fn cpu_times() -> Option<CpuTimes> {
            None
        }
    }
}

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use unsupported as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cpu_times() -> Option<CpuTimes> {
    platform_impl::Platform::cpu_times()
}
