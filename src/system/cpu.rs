/// Cumulative CPU time counters as reported by the OS, in platform ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub total: u64,
}

/// Previous counter observation, kept between samples to compute a busy delta.
#[derive(Debug, Default)]
pub struct CpuBaseline {
    last: Option<CpuTimes>,
}

impl CpuBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Busy percentage since the previous observation.
    ///
    /// Returns 0 for the very first observation and whenever the counters did
    /// not advance (or went backwards).
    pub fn observe(&mut self, now: CpuTimes) -> f32 {
        let Some(prev) = self.last.replace(now) else {
            return 0.0;
        };
        let total_diff = now.total.saturating_sub(prev.total);
        let idle_diff = now.idle.saturating_sub(prev.idle).min(total_diff);
        if total_diff == 0 {
            return 0.0;
        }
        let busy = (total_diff - idle_diff) as f64 / total_diff as f64 * 100.0;
        (busy as f32).clamp(0.0, 100.0)
    }

    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }
}

/// Approximates load as the one-minute load average spread over `cores`.
pub fn load_average_percent(load_one: f64, cores: usize) -> f32 {
    if !load_one.is_finite() || load_one <= 0.0 {
        return 0.0;
    }
    let cores = cores.max(1) as f64;
    ((load_one / cores).min(1.0) * 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_reports_zero() {
        let mut baseline = CpuBaseline::new();
        assert!(!baseline.has_baseline());
        assert_eq!(baseline.observe(CpuTimes { idle: 500, total: 1000 }), 0.0);
        assert!(baseline.has_baseline());
    }

    #[test]
    fn delta_between_observations() {
        let mut baseline = CpuBaseline::new();
        baseline.observe(CpuTimes { idle: 500, total: 1000 });
        // 100 ticks elapsed, 25 idle
        let busy = baseline.observe(CpuTimes { idle: 525, total: 1100 });
        assert!((busy - 75.0).abs() < 1e-4);
    }

    #[test]
    fn stalled_or_reset_counters_report_zero() {
        let mut baseline = CpuBaseline::new();
        baseline.observe(CpuTimes { idle: 500, total: 1000 });
        assert_eq!(baseline.observe(CpuTimes { idle: 500, total: 1000 }), 0.0);
        assert_eq!(baseline.observe(CpuTimes { idle: 10, total: 20 }), 0.0);
    }

    #[test]
    fn idle_exceeding_total_is_clamped() {
        let mut baseline = CpuBaseline::new();
        baseline.observe(CpuTimes { idle: 0, total: 0 });
        assert_eq!(baseline.observe(CpuTimes { idle: 200, total: 100 }), 0.0);
    }

    #[test]
    fn load_average_is_normalized_and_clamped() {
        assert_eq!(load_average_percent(2.0, 4), 50.0);
        assert_eq!(load_average_percent(16.0, 4), 100.0);
        assert_eq!(load_average_percent(1.0, 0), 100.0);
        assert_eq!(load_average_percent(-1.0, 4), 0.0);
        assert_eq!(load_average_percent(f64::NAN, 4), 0.0);
    }
}
