use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{AnalysisError, truncate_body},
    model::{Coordinates, EnvironmentalRecord},
};

use super::{AirQualityCurrent, EnvironmentSource, WeatherCurrent, merge, parse_current};

const FORECAST: &str = "Open-Meteo forecast API";
const AIR_QUALITY: &str = "Open-Meteo air-quality API";

/// Client for the Open-Meteo forecast and air-quality APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    forecast_url: String,
    air_quality_url: String,
    air_quality_domain: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(
        forecast_url: impl Into<String>,
        air_quality_url: impl Into<String>,
        air_quality_domain: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(user_agent).timeout(timeout).build()?;

        Ok(Self {
            forecast_url: forecast_url.into(),
            air_quality_url: air_quality_url.into(),
            air_quality_domain: air_quality_domain.into(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.endpoints.forecast_url.clone(),
            config.endpoints.air_quality_url.clone(),
            config.endpoints.air_quality_domain.clone(),
            &config.user_agent,
            config.timeouts.fetch(),
        )
    }

    async fn fetch_weather(
        &self,
        coords: Coordinates,
    ) -> Result<Option<WeatherCurrent>, AnalysisError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            (
                "current",
                "temperature_2m,relative_humidity_2m,apparent_temperature".to_string(),
            ),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("precipitation_unit", "mm".to_string()),
            ("timezone", "auto".to_string()),
        ];

        let current = self.get_current(FORECAST, &self.forecast_url, &query).await?;
        match &current {
            Some(_) => info!("fetched current weather data"),
            None => warn!("could not parse current weather data from API response"),
        }
        Ok(current)
    }

    async fn fetch_air_quality(
        &self,
        coords: Coordinates,
    ) -> Result<Option<AirQualityCurrent>, AnalysisError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", "us_aqi,pm2_5,ozone".to_string()),
            ("domains", self.air_quality_domain.clone()),
        ];

        let current = self.get_current(AIR_QUALITY, &self.air_quality_url, &query).await?;
        match &current {
            Some(_) => info!("fetched current air quality data"),
            None => warn!("could not parse current air quality data from API response"),
        }
        Ok(current)
    }

    async fn get_current<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, AnalysisError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| AnalysisError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| AnalysisError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(AnalysisError::Status { endpoint, status, body: truncate_body(&body) });
        }

        parse_current(endpoint, &body)
    }
}

#[async_trait]
impl EnvironmentSource for OpenMeteoClient {
    async fn fetch(&self, coords: Coordinates) -> Result<EnvironmentalRecord, AnalysisError> {
        info!(%coords, "fetching data from Open-Meteo");

        let (weather, air_quality) =
            tokio::try_join!(self.fetch_weather(coords), self.fetch_air_quality(coords))?;

        Ok(merge(weather, air_quality))
    }
}
