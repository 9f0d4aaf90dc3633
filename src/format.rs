use std::time::SystemTime;

use crate::system::snapshot::HardwareSnapshot;
use crate::weather::WeatherReading;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn format_hardware(stats: &HardwareSnapshot) -> String {
    format!(
        "CPU {:5.1}% | RAM {:.1} / {:.1} GB ({:.0}%)",
        stats.cpu_load_percent,
        stats.ram_used_gb,
        stats.ram_total_gb,
        stats.ram_percent()
    )
}

pub fn format_weather(location: &str, reading: Option<&WeatherReading>, loading: bool) -> String {
    if loading {
        return format!("{location}: loading...");
    }
    match reading {
        Some(w) => format!(
            "{location}: {} {:.1}°C wind {:.1} km/h ({})",
            w.summary,
            w.temperature_c,
            w.wind_kph,
            format_age(w.observed_at, SystemTime::now())
        ),
        None => format!("{location}: no data"),
    }
}

pub fn format_age(observed_at: SystemTime, now: SystemTime) -> String {
    let secs = now
        .duration_since(observed_at)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

/// Renders percentages in [0, 100] as block characters, keeping the last
/// `width` samples.
pub fn sparkline(samples: &[f32], width: usize) -> String {
    let start = samples.len().saturating_sub(width);
    samples[start..]
        .iter()
        .map(|&v| {
            let level = (v.clamp(0.0, 100.0) / 100.0 * (SPARK_LEVELS.len() - 1) as f32).round();
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::snapshot::MemoryUsage;
    use std::time::Duration;

    #[test]
    fn hardware_line() {
        let stats = HardwareSnapshot::new(
            12.34,
            MemoryUsage {
                used_gb: 4.0,
                total_gb: 16.0,
            },
        );
        assert_eq!(format_hardware(&stats), "CPU  12.3% | RAM 4.0 / 16.0 GB (25%)");
    }

    #[test]
    fn weather_line_states() {
        assert_eq!(format_weather("Tashkent", None, true), "Tashkent: loading...");
        assert_eq!(format_weather("Tashkent", None, false), "Tashkent: no data");

        let reading = WeatherReading {
            summary: "Code 3".to_string(),
            temperature_c: 21.04,
            wind_kph: 7.0,
            observed_at: SystemTime::now(),
        };
        let line = format_weather("Tashkent", Some(&reading), false);
        assert!(line.starts_with("Tashkent: Code 3 21.0°C wind 7.0 km/h"));
    }

    #[test]
    fn age_buckets() {
        let now = SystemTime::now();
        assert_eq!(format_age(now, now), "0s ago");
        assert_eq!(format_age(now - Duration::from_secs(125), now), "2m ago");
        assert_eq!(format_age(now - Duration::from_secs(7200), now), "2h ago");
        // Clock skew into the future
        assert_eq!(format_age(now + Duration::from_secs(5), now), "0s ago");
    }

    #[test]
    fn sparkline_levels_and_width() {
        assert_eq!(sparkline(&[0.0, 50.0, 100.0], 10), "▁▅█");
        assert_eq!(sparkline(&[0.0, 100.0, 100.0], 2), "██");
        assert_eq!(sparkline(&[-5.0, 250.0], 2), "▁█");
        assert_eq!(sparkline(&[], 4), "");
    }
}
