use super::{CpuTimes, PlatformExtensions};

use windows_sys::Win32::{Foundation::FILETIME, System::Threading::GetSystemTimes};

pub struct Platform;

fn filetime_to_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64
}

impl PlatformExtensions for Platform {
    fn cpu_times() -> Option<CpuTimes> {
        let mut idle = unsafe { std::mem::zeroed::<FILETIME>() };
        let mut kernel = unsafe { std::mem::zeroed::<FILETIME>() };
        let mut user = unsafe { std::mem::zeroed::<FILETIME>() };
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            return None;
        }
        // Kernel time already includes idle time
        let idle = filetime_to_u64(&idle);
        let total = filetime_to_u64(&kernel) + filetime_to_u64(&user);
        Some(CpuTimes {
            idle: idle.min(total),
            total,
        })
    }
}
