//! OpenWeatherMap API client
//!
//! Fetches current conditions and the 5-day/3-hour forecast for a city name,
//! always in metric units.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{ForecastSnapshot, WeatherSnapshot};

/// Base URL for the OpenWeatherMap API
pub const OPEN_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Unit system requested from the provider
const UNITS: &str = "metric";

/// Errors that can occur when fetching weather data
///
/// The variants only exist for logging. Callers treat every variant the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Provider answered with a non-success status
    #[error("{endpoint} request failed with status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the OpenWeatherMap current-weather and forecast endpoints
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against the public API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: OPEN_WEATHER_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different base URL (trailing slashes are ignored)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch current conditions for `city`
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.get_json("weather", city).await
    }

    /// Fetch the 5-day/3-hour forecast for `city`
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastSnapshot, FetchError> {
        self.get_json("forecast", city).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, "Requesting weather provider");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city.trim()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
