//! Current-weather feed refreshed off the driving thread.
//!
//! [`client::OpenMeteoClient`] performs one blocking fetch; [`worker::WeatherWorker`]
//! owns the background thread, the single-slot request flag and the last reading.

pub mod client;
pub mod worker;

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::OpenMeteoClient;
pub use worker::{FailurePolicy, WeatherWorker};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeatherReading {
    pub summary: String,
    pub temperature_c: f64,
    pub wind_kph: f64,
    pub observed_at: SystemTime,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("forecast service returned status {0}")]
    Status(u16),

    #[error("malformed forecast payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("forecast payload has no current_weather object")]
    MissingCurrentWeather,
}

/// One blocking fetch of the current conditions.
pub trait WeatherSource: Send {
    fn fetch(&mut self) -> Result<WeatherReading, WeatherError>;
}

#[derive(Deserialize)]
struct ForecastBody {
    current_weather: Option<CurrentWeather>,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: f64,
}

/// Builds a reading from a forecast body. All of `temperature`, `windspeed`
/// and `weathercode` must be present; nothing is defaulted.
pub fn parse_forecast(body: &str, observed_at: SystemTime) -> Result<WeatherReading, WeatherError> {
    let parsed: ForecastBody = serde_json::from_str(body)?;
    let current = parsed
        .current_weather
        .ok_or(WeatherError::MissingCurrentWeather)?;
    Ok(WeatherReading {
        summary: format!("Code {}", current.weathercode as i64),
        temperature_c: current.temperature,
        wind_kph: current.windspeed,
        observed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 41.3,
        "longitude": 69.25,
        "current_weather": {
            "time": "2024-06-01T12:00",
            "temperature": 31.4,
            "windspeed": 9.7,
            "winddirection": 250,
            "weathercode": 3,
            "is_day": 1
        }
    }"#;

    #[test]
    fn parses_current_weather() {
        let now = SystemTime::now();
        let reading = parse_forecast(SAMPLE, now).unwrap();
        assert_eq!(reading.summary, "Code 3");
        assert!((reading.temperature_c - 31.4).abs() < f64::EPSILON);
        assert!((reading.wind_kph - 9.7).abs() < f64::EPSILON);
        assert_eq!(reading.observed_at, now);
    }

    #[test]
    fn missing_current_weather_is_an_error() {
        let err = parse_forecast(r#"{"latitude": 41.3}"#, SystemTime::now()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingCurrentWeather));

        let err = parse_forecast(r#"{"current_weather": null}"#, SystemTime::now()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingCurrentWeather));
    }

    #[test]
    fn missing_inner_field_is_an_error() {
        let body = r#"{"current_weather": {"temperature": 12.0, "weathercode": 1}}"#;
        let err = parse_forecast(body, SystemTime::now()).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = parse_forecast("<html>502 Bad Gateway</html>", SystemTime::now()).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
        assert!(err.to_string().starts_with("malformed forecast payload"));
    }
}
