use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::location::Coordinates;
use crate::models::{CurrentWeatherResponse, WeatherRecord};

/// Weather provider errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("City not found")]
    NotFound,
    #[error("Weather request failed: {0}")]
    Generic(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Generic(err.to_string())
    }
}

/// Client for the current weather endpoint
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    api_base: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        if config.api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY is not set; provider requests will be rejected");
        }

        Ok(Self {
            client: Arc::new(client),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    /// Fetches every city concurrently. Any failure fails the whole batch.
    pub async fn fetch_by_names(&self, names: &[String]) -> Result<Vec<WeatherRecord>, FetchError> {
        tracing::info!("Fetching weather for {} cities", names.len());

        let requests = names.iter().map(|name| {
            self.make_request(vec![("q", name.clone())])
        });

        try_join_all(requests).await
    }

    /// Not-found responses are reported as generic failures here.
    pub async fn fetch_by_coordinates(&self, coords: Coordinates) -> Result<WeatherRecord, FetchError> {
        tracing::info!(
            "Fetching weather for coordinates: {}, {}",
            coords.latitude,
            coords.longitude
        );

        self.make_request(vec![
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ])
        .await
        .map_err(|e| match e {
            FetchError::NotFound => FetchError::Generic("location not found".to_string()),
            other => other,
        })
    }

    /// Makes one GET against the current weather endpoint and normalizes the body
    async fn make_request(
        &self,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<WeatherRecord, FetchError> {
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let url = format!("{}/weather", self.api_base);
        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Provider returned 404");
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Generic(format!(
                "Request failed with status: {}",
                status
            )));
        }

        let data = response.json::<CurrentWeatherResponse>().await?;
        data.into_record()
            .ok_or_else(|| FetchError::Generic("response has no weather conditions".to_string()))
    }
}
