use super::{CpuTimes, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_times() -> Option<CpuTimes> {
        let contents = std::fs::read_to_string("/proc/stat").ok()?;
        parse_proc_stat(&contents)
    }
}

/// Parses the aggregate `cpu` line of /proc/stat.
///
/// Fields after the label: user nice system idle iowait irq softirq steal.
/// guest/guest_nice are already folded into user/nice by the kernel.
fn parse_proc_stat(contents: &str) -> Option<CpuTimes> {
    let line = contents.lines().next()?;
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }
    let values: Vec<u64> = fields
        .take(8)
        .map(|f| f.parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if values.len() < 4 {
        return None;
    }
    let get = |i: usize| values.get(i).copied().unwrap_or(0);

    let idle_all = get(3) + get(4);
    let non_idle = get(0) + get(1) + get(2) + get(5) + get(6) + get(7);
    Some(CpuTimes {
        idle: idle_all,
        total: idle_all + non_idle,
    })
}
