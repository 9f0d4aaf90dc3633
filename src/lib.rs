//! Hardware/process telemetry sampler with a background weather feed.
//!
//! [`MonitorCore`] owns every piece of shared state. A driver calls
//! [`MonitorCore::update`] once per tick; any thread may read the accessors at
//! the same time, and a dedicated worker thread refreshes the weather reading
//! on request.

pub mod config;
pub mod error;
pub mod format;
pub mod monitor;
pub mod system;
pub mod weather;

pub use error::MonitorError;
pub use monitor::MonitorCore;
