use serde::Serialize;

/// Point-in-time hardware reading, replaced wholesale on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HardwareSnapshot {
    pub cpu_load_percent: f32,
    pub ram_used_gb: f32,
    pub ram_total_gb: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryUsage {
    pub used_gb: f32,
    pub total_gb: f32,
}

impl HardwareSnapshot {
    pub fn new(cpu_load_percent: f32, memory: MemoryUsage) -> Self {
        HardwareSnapshot {
            cpu_load_percent: cpu_load_percent.clamp(0.0, 100.0),
            ram_used_gb: memory.used_gb.max(0.0),
            ram_total_gb: memory.total_gb.max(0.0),
        }
    }

    pub fn ram_percent(&self) -> f32 {
        if self.ram_total_gb <= 0.0 {
            return 0.0;
        }
        (self.ram_used_gb / self.ram_total_gb * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_inputs() {
        let snap = HardwareSnapshot::new(
            140.0,
            MemoryUsage {
                used_gb: -1.0,
                total_gb: 16.0,
            },
        );
        assert_eq!(snap.cpu_load_percent, 100.0);
        assert_eq!(snap.ram_used_gb, 0.0);
        assert_eq!(snap.ram_total_gb, 16.0);
    }

    #[test]
    fn ram_percent_handles_zero_total() {
        let snap = HardwareSnapshot::default();
        assert_eq!(snap.ram_percent(), 0.0);

        let snap = HardwareSnapshot::new(
            0.0,
            MemoryUsage {
                used_gb: 4.0,
                total_gb: 16.0,
            },
        );
        assert!((snap.ram_percent() - 25.0).abs() < f32::EPSILON);
    }
}
