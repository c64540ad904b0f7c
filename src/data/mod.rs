//! Core data models for skycast
//!
//! Snapshots are deserialized verbatim from the OpenWeatherMap JSON bodies, so
//! field names follow the provider's wire format.

pub mod insight;
pub mod weather;

pub use insight::{InsightClient, InsightError};
pub use weather::{FetchError, WeatherClient};

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Number of days shown in the forecast strip
pub const FORECAST_DAYS: usize = 5;

/// Marker in `dt_txt` used to pick one reading per day
const NOON_MARKER: &str = "12:00:00";

/// One entry of the provider's `weather` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Provider condition code (e.g. 802)
    pub id: u16,
    /// Short category name (e.g. "Clouds")
    pub main: String,
    /// Free-text description (e.g. "scattered clouds")
    pub description: String,
    /// Provider icon code
    #[serde(default)]
    pub icon: String,
}

impl Condition {
    pub fn category(&self) -> WeatherCategory {
        WeatherCategory::from_code(self.id)
    }
}

/// Temperature and atmosphere readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in Celsius
    pub temp: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    /// Sea-level pressure in hPa
    pub pressure: u32,
    /// Relative humidity percentage
    pub humidity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s
    pub speed: f64,
    #[serde(default)]
    pub deg: u16,
    #[serde(default)]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloudiness percentage
    pub all: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    /// ISO country code
    #[serde(default)]
    pub country: String,
    /// Sunrise as Unix epoch seconds
    pub sunrise: i64,
    /// Sunset as Unix epoch seconds
    pub sunset: i64,
}

/// Current conditions for a city, as returned by `GET /weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Provider-assigned city id
    pub id: u64,
    /// Canonical place name echoed by the provider
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    /// Visibility in metres
    #[serde(default)]
    pub visibility: u32,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Observation time as Unix epoch seconds
    #[serde(default)]
    pub dt: i64,
    pub sys: Sys,
    /// Shift in seconds from UTC for the city
    #[serde(default)]
    pub timezone: i32,
}

impl WeatherSnapshot {
    /// The primary (first) condition descriptor
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Category of the primary condition, `Unknown` when the list is empty
    pub fn category(&self) -> WeatherCategory {
        self.primary_condition()
            .map(Condition::category)
            .unwrap_or(WeatherCategory::Unknown)
    }

    /// Description of the primary condition, empty when missing
    pub fn description(&self) -> &str {
        self.primary_condition()
            .map(|c| c.description.as_str())
            .unwrap_or("")
    }

    /// Visibility converted to kilometres
    pub fn visibility_km(&self) -> f64 {
        f64::from(self.visibility) / 1000.0
    }

    /// Sunrise in the city's local time
    pub fn sunrise_local(&self) -> Option<DateTime<FixedOffset>> {
        local_time(self.sys.sunrise, self.timezone)
    }

    /// Sunset in the city's local time
    pub fn sunset_local(&self) -> Option<DateTime<FixedOffset>> {
        local_time(self.sys.sunset, self.timezone)
    }

    /// Fraction of the day between sunrise and sunset at `now` (epoch seconds).
    ///
    /// Returns `None` before sunrise, after sunset, or if the times are inconsistent.
    pub fn sun_progress(&self, now: i64) -> Option<f64> {
        let span = self.sys.sunset - self.sys.sunrise;
        if span <= 0 || now < self.sys.sunrise || now > self.sys.sunset {
            return None;
        }
        Some((now - self.sys.sunrise) as f64 / span as f64)
    }
}

/// A single 3-hour step of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time as Unix epoch seconds
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Probability of precipitation (0-1)
    #[serde(default)]
    pub pop: f64,
    /// Formatted UTC timestamp, e.g. "2024-07-15 12:00:00"
    pub dt_txt: String,
}

impl ForecastEntry {
    pub fn category(&self) -> WeatherCategory {
        self.weather
            .first()
            .map(Condition::category)
            .unwrap_or(WeatherCategory::Unknown)
    }

    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("")
    }

    /// Forecast time in UTC
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.dt, 0).single()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub timezone: i32,
}

/// 5-day/3-hour forecast, as returned by `GET /forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

impl ForecastSnapshot {
    /// One reading per day: the 12:00 entries, at most [`FORECAST_DAYS`]
    pub fn daily(&self) -> Vec<&ForecastEntry> {
        self.list
            .iter()
            .filter(|entry| entry.dt_txt.contains(NOON_MARKER))
            .take(FORECAST_DAYS)
            .collect()
    }

    /// Temperatures of every 3-hour step, in order
    pub fn temperatures(&self) -> Vec<f64> {
        self.list.iter().map(|entry| entry.main.temp).collect()
    }
}

/// Closed set of weather categories, derived from provider condition codes
///
/// Codes are grouped by hundreds:
/// - 2xx: Thunderstorm
/// - 3xx: Drizzle
/// - 5xx: Rain
/// - 6xx: Snow
/// - 7xx: Atmosphere (mist, smoke, haze, fog, dust...)
/// - 800: Clear
/// - 801-804: Clouds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl WeatherCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => WeatherCategory::Thunderstorm,
            300..=399 => WeatherCategory::Drizzle,
            500..=599 => WeatherCategory::Rain,
            600..=699 => WeatherCategory::Snow,
            700..=799 => WeatherCategory::Atmosphere,
            800 => WeatherCategory::Clear,
            801..=804 => WeatherCategory::Clouds,
            _ => WeatherCategory::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Thunderstorm => "Thunderstorm",
            WeatherCategory::Drizzle => "Drizzle",
            WeatherCategory::Rain => "Rain",
            WeatherCategory::Snow => "Snow",
            WeatherCategory::Atmosphere => "Mist",
            WeatherCategory::Clear => "Clear",
            WeatherCategory::Clouds => "Clouds",
            WeatherCategory::Unknown => "Unknown",
        }
    }
}

fn local_time(epoch: i64, offset_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    offset.timestamp_opt(epoch, 0).single()
}
