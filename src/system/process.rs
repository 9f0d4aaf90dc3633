use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        ProcessRecord {
            pid,
            name: if name.is_empty() {
                "unknown".to_string()
            } else {
                name
            },
        }
    }

    /// `filter_lower` must already be lower-cased.
    fn matches(&self, filter_lower: &str) -> bool {
        filter_lower.is_empty()
            || self.name.to_lowercase().contains(filter_lower)
            || self.pid.to_string().contains(filter_lower)
    }
}

/// Records whose name (case-insensitive) or decimal pid contains `filter`.
/// An empty filter keeps everything.
pub fn filter_processes(records: &[ProcessRecord], filter: &str) -> Vec<ProcessRecord> {
    let filter_lower = filter.to_lowercase();
    records
        .iter()
        .filter(|p| p.matches(&filter_lower))
        .cloned()
        .collect()
}
