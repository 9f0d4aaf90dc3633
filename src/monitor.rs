//! Shared monitor state: hardware snapshot, CPU history, process cache and
//! the weather feed, each behind its own lock.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{MonitorError, Result};
use crate::system::collector::{HostMetrics, ProcessTable, SysinfoProcessTable, SystemProbe};
use crate::system::history::CpuHistory;
use crate::system::kill::KillResult;
use crate::system::process::{ProcessRecord, filter_processes};
use crate::system::snapshot::HardwareSnapshot;
use crate::weather::{FailurePolicy, OpenMeteoClient, WeatherReading, WeatherSource, WeatherWorker};

struct HardwareState {
    snapshot: HardwareSnapshot,
    history: CpuHistory,
}

/// Providers are only touched from `update` and `terminate_process`; the
/// lock keeps those two from aliasing the process table.
struct Sources {
    host: Box<dyn HostMetrics>,
    table: Box<dyn ProcessTable>,
}

pub struct MonitorCore {
    sources: Mutex<Sources>,
    hardware: Mutex<HardwareState>,
    processes: Mutex<Arc<Vec<ProcessRecord>>>,
    weather: WeatherWorker,
}

impl MonitorCore {
    /// Monitor backed by the platform providers and the Open-Meteo client.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_sources(
            config,
            SystemProbe::new(),
            SysinfoProcessTable::new(),
            OpenMeteoClient::new(&config.weather),
        )
    }

    pub fn with_sources<H, P, W>(config: &Config, host: H, table: P, weather: W) -> Result<Self>
    where
        H: HostMetrics + 'static,
        P: ProcessTable + 'static,
        W: WeatherSource + 'static,
    {
        let policy = FailurePolicy::from_keep_last(config.weather.keep_last_on_failure);
        let weather = WeatherWorker::spawn(weather, config.weather.poll_interval(), policy)
            .map_err(MonitorError::WorkerSpawn)?;

        Ok(MonitorCore {
            sources: Mutex::new(Sources {
                host: Box::new(host),
                table: Box::new(table),
            }),
            hardware: Mutex::new(HardwareState {
                snapshot: HardwareSnapshot::default(),
                history: CpuHistory::new(config.general.history_capacity),
            }),
            processes: Mutex::new(Arc::new(Vec::new())),
            weather,
        })
    }

    /// One sampling tick: CPU delta, memory, and a fresh process listing.
    ///
    /// Meant to be driven from a single thread; readers may run concurrently.
    pub fn update(&self) {
        let _span = tracing::debug_span!("monitor.update").entered();

        let (cpu, memory, listing) = {
            let mut sources = self.sources.lock();
            let cpu = sources.host.sample_cpu_busy_delta();
            let memory = sources.host.sample_memory();
            let listing = sources.table.list_processes();
            (cpu, memory, listing)
        };

        let snapshot = HardwareSnapshot::new(cpu, memory);
        {
            let mut hardware = self.hardware.lock();
            hardware.snapshot = snapshot;
            hardware.history.push(snapshot.cpu_load_percent);
        }

        let count = listing.len();
        *self.processes.lock() = Arc::new(listing);

        debug!(
            cpu = snapshot.cpu_load_percent,
            ram_used_gb = snapshot.ram_used_gb,
            processes = count,
            "tick"
        );
    }

    pub fn hardware_stats(&self) -> HardwareSnapshot {
        self.hardware.lock().snapshot
    }

    /// Oldest sample first.
    pub fn cpu_history(&self) -> Vec<f32> {
        self.hardware.lock().history.to_vec()
    }

    pub fn history_capacity(&self) -> usize {
        self.hardware.lock().history.capacity()
    }

    /// Cached processes whose name (case-insensitive) or pid contains `filter`.
    pub fn processes(&self, filter: &str) -> Vec<ProcessRecord> {
        let cache = Arc::clone(&*self.processes.lock());
        filter_processes(&cache, filter)
    }

    pub fn process_count(&self) -> usize {
        self.processes.lock().len()
    }

    /// Sends a graceful terminate request. The process cache is left as is
    /// until the next `update`.
    pub fn terminate_process(&self, pid: u32) -> KillResult {
        let result = self.sources.lock().table.terminate(pid);
        if result.is_success() {
            info!(pid, "{}", result.message());
        } else {
            warn!(pid, "{}", result.message());
        }
        result
    }

    pub fn request_weather_refresh(&self) -> bool {
        self.weather.request_refresh()
    }

    pub fn is_weather_loading(&self) -> bool {
        self.weather.is_loading()
    }

    pub fn weather(&self) -> Option<WeatherReading> {
        self.weather.latest()
    }
}
