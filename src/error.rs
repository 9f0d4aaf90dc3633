use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to start weather worker thread: {0}")]
    WorkerSpawn(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
