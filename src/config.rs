use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub history_capacity: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            history_capacity: 256,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_label: String,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Keep the previous reading when a refresh fails instead of clearing it.
    pub keep_last_on_failure: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig {
            endpoint: "https://api.open-meteo.com/v1/forecast".to_string(),
            latitude: 41.29,
            longitude: 69.23,
            location_label: "Tashkent".to_string(),
            timeout_secs: 10,
            poll_interval_ms: 200,
            keep_last_on_failure: false,
        }
    }
}

impl WeatherConfig {
    pub fn forecast_url(&self) -> String {
        format!(
            "{}?latitude={}&longitude={}&current_weather=true",
            self.endpoint.trim_end_matches('?'),
            self.latitude,
            self.longitude
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hudmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}
