//! Gemini client for short weather summaries
//!
//! Insight failures never reach the caller: [`InsightClient::get_insight`] always
//! returns a readable string. [`InsightClient::try_insight`] keeps the structured
//! error for logging.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::WeatherSnapshot;

/// Base URL for the Gemini REST API
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for summaries
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Returned when no API key is configured
pub const UNAVAILABLE_MESSAGE: &str =
    "AI insights are unavailable. Please configure the Gemini API Key.";
/// Returned when the provider answers with no text
pub const EMPTY_MESSAGE: &str = "Unable to generate insight.";
/// Returned on any provider or transport failure
pub const FAILURE_MESSAGE: &str = "Could not connect to AI service.";

/// Errors that can occur when requesting an insight
#[derive(Debug, Error)]
pub enum InsightError {
    /// No API key configured
    #[error("Gemini API key is not configured")]
    NotConfigured,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Provider returned no text
    #[error("Empty response")]
    Empty,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl InsightClient {
    /// Create a new client. A missing or blank key disables insights.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Point the client at a different base URL (trailing slashes are ignored)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Summary for `snapshot`, or one of the fixed fallback messages
    pub async fn get_insight(&self, snapshot: &WeatherSnapshot) -> String {
        match self.try_insight(snapshot).await {
            Ok(text) => text,
            Err(InsightError::NotConfigured) => UNAVAILABLE_MESSAGE.to_string(),
            Err(InsightError::Empty) => EMPTY_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "Insight request failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// Summary for `snapshot`, keeping the failure reason
    #[instrument(skip_all, fields(city = %snapshot.name))]
    pub async fn try_insight(&self, snapshot: &WeatherSnapshot) -> Result<String, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::NotConfigured)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(snapshot),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(url = %url, "Requesting insight");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&text)?;

        let insight: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if insight.trim().is_empty() {
            return Err(InsightError::Empty);
        }
        Ok(insight)
    }
}

/// Builds the prompt sent to the model for `snapshot`
pub fn build_prompt(snapshot: &WeatherSnapshot) -> String {
    format!(
        "The current weather in {}, {} is:\n\
         - Temperature: {}°C (Feels like {}°C)\n\
         - Condition: {}\n\
         - Humidity: {}%\n\
         - Wind Speed: {} m/s\n\n\
         Provide a short, witty, and helpful summary for a user.\n\
         Include an outfit recommendation.\n\
         Keep it under 60 words.",
        snapshot.name,
        snapshot.sys.country,
        snapshot.main.temp,
        snapshot.main.feels_like,
        snapshot.description(),
        snapshot.main.humidity,
        snapshot.wind.speed,
    )
}
