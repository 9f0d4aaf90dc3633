use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

use super::cpu::{CpuBaseline, load_average_percent};
use super::kill::{KillResult, kill_process};
use super::platform;
use super::process::ProcessRecord;
use super::snapshot::MemoryUsage;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Instantaneous host readings. Implementations may keep a CPU baseline
/// between calls but share nothing else with the caller.
pub trait HostMetrics: Send {
    /// Busy percentage in [0, 100] since the previous call; 0 on the first call.
    fn sample_cpu_busy_delta(&mut self) -> f32;
    fn sample_memory(&mut self) -> MemoryUsage;
}

/// Running-process listing and graceful termination.
pub trait ProcessTable: Send {
    fn list_processes(&mut self) -> Vec<ProcessRecord>;
    fn terminate(&mut self, pid: u32) -> KillResult;
}

pub fn bytes_to_gb(bytes: u64) -> f32 {
    (bytes as f64 / BYTES_PER_GB) as f32
}

/// Default [`HostMetrics`]: platform CPU counters with a load-average
/// fallback, memory from sysinfo.
pub struct SystemProbe {
    sys: System,
    baseline: CpuBaseline,
    cores: usize,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe {
    pub fn new() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        SystemProbe {
            sys: System::new(),
            baseline: CpuBaseline::new(),
            cores,
        }
    }
}

impl HostMetrics for SystemProbe {
    fn sample_cpu_busy_delta(&mut self) -> f32 {
        match platform::cpu_times() {
            Some(times) => self.baseline.observe(times),
            None => {
                let load = System::load_average();
                load_average_percent(load.one, self.cores)
            }
        }
    }

    fn sample_memory(&mut self) -> MemoryUsage {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let used = self.sys.used_memory().min(total);
        MemoryUsage {
            used_gb: bytes_to_gb(used),
            total_gb: bytes_to_gb(total),
        }
    }
}

/// Default [`ProcessTable`] backed by sysinfo.
pub struct SysinfoProcessTable {
    sys: System,
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProcessTable {
    pub fn new() -> Self {
        SysinfoProcessTable { sys: System::new() }
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn list_processes(&mut self) -> Vec<ProcessRecord> {
        let _span = tracing::debug_span!("collector.list_processes").entered();

        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let mut records: Vec<ProcessRecord> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                ProcessRecord::new(pid.as_u32(), process.name().to_string_lossy().to_string())
            })
            .collect();
        records.sort_unstable_by_key(|p| p.pid);
        records
    }

    fn terminate(&mut self, pid: u32) -> KillResult {
        // Look the pid up fresh; the cached listing may be a tick old.
        let pids = [Pid::from_u32(pid)];
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing(),
        );
        kill_process(&self.sys, pid, Signal::Term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_gb_converts_binary_gigabytes() {
        assert_eq!(bytes_to_gb(0), 0.0);
        assert!((bytes_to_gb(8 * 1024 * 1024 * 1024) - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn probe_readings_are_in_range() {
        let mut probe = SystemProbe::new();
        for _ in 0..3 {
            let cpu = probe.sample_cpu_busy_delta();
            assert!((0.0..=100.0).contains(&cpu));
        }
        let mem = probe.sample_memory();
        assert!(mem.used_gb >= 0.0);
        assert!(mem.used_gb <= mem.total_gb);
    }

    #[test]
    fn process_table_lists_current_process() {
        let mut table = SysinfoProcessTable::new();
        let records = table.list_processes();
        let own = std::process::id();
        assert!(records.iter().any(|p| p.pid == own));
        assert!(records.windows(2).all(|w| w[0].pid <= w[1].pid));
    }

    #[test]
    fn terminate_unknown_pid_reports_not_found() {
        let mut table = SysinfoProcessTable::new();
        assert_eq!(table.terminate(u32::MAX), KillResult::NotFound(u32::MAX));
    }
}
