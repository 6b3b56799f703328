//! Today's weather lookup
//!
//! Every new todo records the weather on the day it was written. The
//! upstream service returns a JSON array of `{ "date": "MM-dd", "weather": "..." }`
//! entries; [`select_weather`] picks the entry for a given calendar day.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Public weather feed used when `WEATHER_API_URL` is unset
pub const DEFAULT_WEATHER_API_URL: &str = "https://f-api.github.io/f-api/weather.json";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather service returned status {0}")]
    Status(u16),

    #[error("Weather data is empty")]
    Empty,

    #[error("No weather data for {0}")]
    NotFoundForToday(String),
}

/// One day of weather as served by the upstream feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherEntry {
    /// Month and day, `MM-dd`
    pub date: String,
    pub weather: String,
}

/// Source of today's weather
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn today_weather(&self) -> Result<String, WeatherError>;
}

/// Picks the entry whose `date` matches `today` formatted as `MM-dd`.
pub fn select_weather(entries: &[WeatherEntry], today: NaiveDate) -> Result<String, WeatherError> {
    if entries.is_empty() {
        return Err(WeatherError::Empty);
    }

    let key = today.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or(WeatherError::NotFoundForToday(key))
}

/// Fetches the weather feed over HTTP on every call
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherClient {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        debug!(url = %self.url, "Fetching weather data");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Weather service returned an error status");
            return Err(WeatherError::Status(status.as_u16()));
        }

        let entries: Vec<WeatherEntry> = response.json().await?;
        select_weather(&entries, Local::now().date_naive())
    }
}

/// Fixed weather, for development and tests
#[derive(Debug, Clone)]
pub struct StaticWeather(pub String);

impl StaticWeather {
    pub fn new(weather: impl Into<String>) -> Self {
        Self(weather.into())
    }
}

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        Ok(self.0.clone())
    }
}
