use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SprinklerError};
use crate::models::{ForecastSnapshot, HistorySnapshot};
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions and daily forecast from One Call 3.0.
    /// Minutely/hourly/alerts are excluded; the engine only needs current
    /// and daily rain fields.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastSnapshot> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&exclude=minutely,hourly,alerts&appid={}",
            API_BASE_URL, lat, lon, self.config.api_key
        );
        self.get_json(&url).await
    }

    /// Fetch yesterday's hourly observations from the One Call timemachine.
    pub async fn fetch_history(&self, lat: f64, lon: f64) -> Result<HistorySnapshot> {
        let yesterday = (chrono::Utc::now() - chrono::Duration::days(1)).timestamp();
        let url = format!(
            "{}/onecall/timemachine?lat={}&lon={}&dt={}&appid={}",
            API_BASE_URL, lat, lon, yesterday, self.config.api_key
        );
        self.get_json(&url).await
    }

    /// Test connection to the OpenWeatherMap API.
    pub async fn test_connection(&self, lat: f64, lon: f64) -> Result<bool> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&exclude=minutely,hourly,daily,alerts&appid={}",
            API_BASE_URL, lat, lon, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                SprinklerError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response =
            self.client.get(url).send().await.map_err(|e| {
                SprinklerError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SprinklerError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            SprinklerError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}
