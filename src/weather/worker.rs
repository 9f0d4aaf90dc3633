use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{WeatherError, WeatherReading, WeatherSource};

/// What a failed refresh does to the previously stored reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Clear,
    KeepLast,
}

impl FailurePolicy {
    pub fn from_keep_last(keep_last: bool) -> Self {
        if keep_last {
            FailurePolicy::KeepLast
        } else {
            FailurePolicy::Clear
        }
    }
}

struct Shared {
    reading: Mutex<Option<WeatherReading>>,
    /// Set by a requester, cleared by the worker once the fetch completes.
    loading: AtomicBool,
    stop: AtomicBool,
    policy: FailurePolicy,
}

impl Shared {
    fn store(&self, outcome: Result<WeatherReading, WeatherError>) {
        match outcome {
            Ok(reading) => {
                info!(
                    summary = %reading.summary,
                    temperature_c = reading.temperature_c,
                    wind_kph = reading.wind_kph,
                    "weather refreshed"
                );
                *self.reading.lock() = Some(reading);
            }
            Err(err) => {
                warn!(error = %err, policy = ?self.policy, "weather refresh failed");
                if self.policy == FailurePolicy::Clear {
                    *self.reading.lock() = None;
                }
            }
        }
    }
}

/// Owns the background weather thread. Dropping the worker stops and joins it.
pub struct WeatherWorker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl WeatherWorker {
    pub fn spawn<S>(source: S, poll_interval: Duration, policy: FailurePolicy) -> io::Result<Self>
    where
        S: WeatherSource + 'static,
    {
        let shared = Arc::new(Shared {
            reading: Mutex::new(None),
            loading: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            policy,
        });

        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("weather-worker".to_string())
            .spawn(move || run(worker_shared, source, poll_interval))?;

        Ok(WeatherWorker {
            shared,
            handle: Some(handle),
        })
    }

    /// Marks a refresh as pending. Returns `false` if one is already pending
    /// or in flight; the request is then coalesced into that one.
    pub fn request_refresh(&self) -> bool {
        let accepted = self
            .shared
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if accepted {
            debug!("weather refresh requested");
            if let Some(handle) = &self.handle {
                handle.thread().unpark();
            }
        } else {
            debug!("weather refresh already pending, request coalesced");
        }
        accepted
    }

    pub fn is_loading(&self) -> bool {
        self.shared.loading.load(Ordering::Acquire)
    }

    pub fn latest(&self) -> Option<WeatherReading> {
        self.shared.reading.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the thread to stop and waits for it. An in-flight fetch is
    /// allowed to finish first.
    pub fn shutdown(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("weather worker panicked before shutdown");
            }
            debug!("weather worker joined");
        }
    }
}

impl Drop for WeatherWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<S: WeatherSource>(shared: Arc<Shared>, mut source: S, poll_interval: Duration) {
    debug!(?poll_interval, "weather worker started");
    while !shared.stop.load(Ordering::Acquire) {
        if shared.loading.load(Ordering::Acquire) {
            let outcome = source.fetch();
            shared.store(outcome);
            shared.loading.store(false, Ordering::Release);
        }
        thread::park_timeout(poll_interval);
    }
    debug!("weather worker stopped");
}
