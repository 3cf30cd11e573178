//! Open-Meteo forecast client

use reqwest::Client;

use crate::errors::{Error, Result};
use crate::models::Forecast;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// HTTP client for the Open-Meteo forecast API
pub struct MeteoClient {
    base_url: String,
    http: Client,
}

impl MeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create with explicit base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fetch the hourly temperature forecast for a coordinate
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Upstream(e.to_string()))?;

        response
            .json::<Forecast>()
            .await
            .map_err(|e| Error::Upstream(format!("invalid forecast payload: {e}")))
    }
}

impl Default for MeteoClient {
    fn default() -> Self {
        Self::new()
    }
}
