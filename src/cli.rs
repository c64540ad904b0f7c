//! Command-line interface parsing for skycast
//!
//! Every option can also come from the environment, so credentials never have
//! to appear on the command line.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::contact::DEFAULT_CONTACT_EMAIL;
use crate::data::insight::GEMINI_BASE_URL;
use crate::data::weather::OPEN_WEATHER_BASE_URL;

/// City loaded at startup when none is given
pub const DEFAULT_CITY: &str = "London";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The default city is empty or whitespace
    #[error("Invalid city: '{0}'. The city name must not be empty")]
    InvalidCity(String),
}

/// skycast - current weather, 5-day forecast and AI outfit tips in your terminal
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Terminal weather dashboard with forecasts and AI insights")]
#[command(version)]
pub struct Cli {
    /// City to load at startup
    #[arg(long, env = "SKYCAST_CITY", default_value = DEFAULT_CITY)]
    pub city: String,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini API key; AI insights are disabled without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Recipient of the contact form
    #[arg(long, env = "SKYCAST_CONTACT_EMAIL", default_value = DEFAULT_CONTACT_EMAIL)]
    pub contact_email: String,

    /// Log file (defaults to skycast.log in the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level filter; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, hide = true, default_value = OPEN_WEATHER_BASE_URL)]
    pub weather_url: String,

    #[arg(long, hide = true, default_value = GEMINI_BASE_URL)]
    pub insight_url: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City fetched once at startup
    pub default_city: String,
    /// OpenWeatherMap key; empty when not supplied
    pub weather_api_key: String,
    pub gemini_api_key: Option<String>,
    pub contact_email: String,
    pub weather_url: String,
    pub insight_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            weather_api_key: String::new(),
            gemini_api_key: None,
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            weather_url: OPEN_WEATHER_BASE_URL.to_string(),
            insight_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the trimmed city
    /// * `Err(CliError::InvalidCity)` if the city is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let city = cli.city.trim();
        if city.is_empty() {
            return Err(CliError::InvalidCity(cli.city.clone()));
        }

        Ok(StartupConfig {
            default_city: city.to_string(),
            weather_api_key: cli.api_key.clone().unwrap_or_default(),
            gemini_api_key: cli.gemini_key.clone(),
            contact_email: cli.contact_email.clone(),
            weather_url: cli.weather_url.clone(),
            insight_url: cli.insight_url.clone(),
        })
    }
}
