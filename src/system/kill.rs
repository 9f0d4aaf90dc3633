use std::fmt;

use sysinfo::{Pid, Signal, System};

/// Outcome of a termination request. Failures carry a human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KillResult {
    Success(u32, &'static str),
    Failed(u32, String),
    NotFound(u32),
}

impl KillResult {
    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(..))
    }

    pub fn pid(&self) -> u32 {
        match self {
            KillResult::Success(pid, _) | KillResult::Failed(pid, _) | KillResult::NotFound(pid) => {
                *pid
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            KillResult::Success(pid, signal) => format!("Sent {signal} to PID {pid}"),
            KillResult::Failed(_, reason) => reason.clone(),
            KillResult::NotFound(pid) => {
                format!("Process {pid} not found or access denied")
            }
        }
    }
}

impl fmt::Display for KillResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Sends `signal` to `pid` if `sys` currently knows the process.
/// Does not wait for the process to exit.
pub fn kill_process(sys: &System, pid: u32, signal: Signal) -> KillResult {
    let sysinfo_pid = Pid::from_u32(pid);
    let Some(process) = sys.process(sysinfo_pid) else {
        return KillResult::NotFound(pid);
    };

    let signal_name = match signal {
        Signal::Term => "SIGTERM",
        Signal::Kill => "SIGKILL",
        _ => "signal",
    };
    match process.kill_with(signal) {
        Some(true) => KillResult::Success(pid, signal_name),
        Some(false) => KillResult::Failed(
            pid,
            format!("Signal delivery failed: could not send {signal_name} to PID {pid}"),
        ),
        None => {
            // Signal not supported on this platform (Windows), use its terminate call
            if process.kill() {
                KillResult::Success(pid, "terminate")
            } else {
                KillResult::Failed(
                    pid,
                    format!("Signal delivery failed: could not terminate PID {pid}"),
                )
            }
        }
    }
}
