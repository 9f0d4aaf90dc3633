use std::time::{Duration, SystemTime};

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::{WeatherError, WeatherReading, WeatherSource, parse_forecast};
use crate::config::WeatherConfig;

const MAX_REDIRECTS: usize = 10;

/// Blocking Open-Meteo client for a fixed location.
///
/// The HTTP client is built on first use so that it is created (and later
/// dropped) on the worker thread rather than inside the driver's runtime.
pub struct OpenMeteoClient {
    url: String,
    timeout: Duration,
    http: Option<Client>,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Self {
        OpenMeteoClient {
            url: config.forecast_url(),
            timeout: config.timeout(),
            http: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn http(&mut self) -> Result<&Client, WeatherError> {
        let client = match self.http.take() {
            Some(client) => client,
            None => Client::builder()
                .user_agent(concat!("hudmon/", env!("CARGO_PKG_VERSION")))
                .timeout(self.timeout)
                .redirect(Policy::limited(MAX_REDIRECTS))
                .build()?,
        };
        Ok(self.http.insert(client))
    }
}

impl WeatherSource for OpenMeteoClient {
    fn fetch(&mut self) -> Result<WeatherReading, WeatherError> {
        let url = self.url.clone();
        let response = self.http()?.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_forecast(&body, SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_comes_from_config() {
        let config = WeatherConfig {
            endpoint: "http://127.0.0.1:9/v1/forecast".to_string(),
            latitude: 1.5,
            longitude: -2.25,
            ..WeatherConfig::default()
        };
        let client = OpenMeteoClient::new(&config);
        assert_eq!(
            client.url(),
            "http://127.0.0.1:9/v1/forecast?latitude=1.5&longitude=-2.25&current_weather=true"
        );
    }

    #[test]
    fn unreachable_endpoint_is_an_http_error() {
        // Port 9 (discard) is closed on any sane test host
        let config = WeatherConfig {
            endpoint: "http://127.0.0.1:9/v1/forecast".to_string(),
            timeout_secs: 2,
            ..WeatherConfig::default()
        };
        let mut client = OpenMeteoClient::new(&config);
        let err = client.fetch().unwrap_err();
        assert!(matches!(err, WeatherError::Http(_)));
    }
}
