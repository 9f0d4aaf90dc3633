use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 256;

/// Fixed-capacity FIFO of CPU load samples, oldest first.
#[derive(Debug, Clone)]
pub struct CpuHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl CpuHistory {
    /// A capacity of zero is raised to one so that the latest sample is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }
}

impl Default for CpuHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
