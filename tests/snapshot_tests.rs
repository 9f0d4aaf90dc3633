use insta::assert_debug_snapshot;
use hudmon::system::process::{ProcessRecord, filter_processes};

fn mock_cache() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::new(1, "init"),
        ProcessRecord::new(123, "Chrome"),
        ProcessRecord::new(456, "bash"),
        ProcessRecord::new(1234, "chrome_crashpad"),
        ProcessRecord::new(4560, "zsh"),
        // sysinfo reports some kernel threads without a name
        ProcessRecord::new(7000, ""),
    ]
}

fn rows(records: &[ProcessRecord]) -> Vec<(u32, String)> {
    records.iter().map(|p| (p.pid, p.name.clone())).collect()
}

#[test]
fn name_filter_snapshot() {
    let matches = filter_processes(&mock_cache(), "CH");
    assert_debug_snapshot!("filter_by_name", rows(&matches));
}

#[test]
fn pid_filter_snapshot() {
    let matches = filter_processes(&mock_cache(), "456");
    assert_debug_snapshot!("filter_by_pid", rows(&matches));
}

#[test]
fn filter_preserves_cache_order_and_placeholder_names() {
    let cache = mock_cache();

    let all = filter_processes(&cache, "");
    assert_eq!(all, cache);

    let unknown = filter_processes(&cache, "unknown");
    assert_eq!(unknown, vec![ProcessRecord::new(7000, "unknown")]);

    let pids: Vec<u32> = filter_processes(&cache, "1").iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![1, 123, 1234]);
}
