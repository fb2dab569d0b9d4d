use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{config::Config, error::AnalysisError, model::Coordinates};

use super::Geocoder;

/// OpenStreetMap Nominatim search client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Why a lookup produced no coordinates. Only ever logged.
#[derive(Debug, Error)]
enum LookupMiss {
    #[error("no matches")]
    NoMatches,
    #[error("timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("undecodable answer: {0}")]
    Malformed(String),
    #[error("coordinates out of range: lat={lat}, lon={lon}")]
    OutOfRange { lat: String, lon: String },
}

impl From<reqwest::Error> for LookupMiss {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { LookupMiss::Timeout(err) } else { LookupMiss::Transport(err) }
    }
}

impl NominatimGeocoder {
    pub fn new(
        url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(user_agent).timeout(timeout).build()?;
        Ok(Self { url: url.into(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.endpoints.geocoding_url.clone(),
            &config.user_agent,
            config.timeouts.geocode(),
        )
    }

    async fn lookup(&self, place: &str) -> Result<Coordinates, LookupMiss> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(LookupMiss::Status(status));
        }

        let body = res.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| LookupMiss::Malformed(e.to_string()))?;

        let first = places.into_iter().next().ok_or(LookupMiss::NoMatches)?;
        if let Some(name) = &first.display_name {
            debug!(%name, "nominatim match");
        }

        let lat = first.lat.trim().parse::<f64>();
        let lon = first.lon.trim().parse::<f64>();
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => Coordinates::new(lat, lon)
                .ok_or(LookupMiss::OutOfRange { lat: first.lat, lon: first.lon }),
            _ => Err(LookupMiss::Malformed(format!(
                "non-numeric coordinates lat={:?} lon={:?}",
                first.lat, first.lon
            ))),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &str) -> Result<Coordinates, AnalysisError> {
        info!(%place, "geocoding location");

        match self.lookup(place).await {
            Ok(coords) => {
                info!(%coords, "found coordinates");
                Ok(coords)
            }
            Err(miss) => {
                warn!(%place, reason = %miss, "could not find coordinates");
                Err(AnalysisError::LocationNotFound { place: place.to_string() })
            }
        }
    }
}
