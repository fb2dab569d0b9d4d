use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt::Debug;

use crate::{
    error::AnalysisError,
    model::{Coordinates, EnvironmentalRecord},
};

pub mod openmeteo;

pub use openmeteo::OpenMeteoClient;

/// Source of current environmental conditions for a point.
#[async_trait]
pub trait EnvironmentSource: Send + Sync + Debug {
    async fn fetch(&self, coords: Coordinates) -> Result<EnvironmentalRecord, AnalysisError>;
}

/// `current` block of a weather answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherCurrent {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
}

/// `current` block of an air-quality answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirQualityCurrent {
    pub time: Option<String>,
    pub us_aqi: Option<f64>,
    pub pm2_5: Option<f64>,
    pub ozone: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    current: Option<T>,
}

/// Decode a body and pull out its optional `current` block.
///
/// A well-formed body without `current` is `Ok(None)`; anything that is not
/// valid JSON of the expected shape is an error.
pub fn parse_current<T: DeserializeOwned>(
    endpoint: &'static str,
    body: &str,
) -> Result<Option<T>, AnalysisError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|env| env.current)
        .map_err(|source| AnalysisError::MalformedResponse { endpoint, source })
}

/// Combine the two independently fetched sections. Never fails; a missing
/// section leaves its fields absent.
pub fn merge(
    weather: Option<WeatherCurrent>,
    air_quality: Option<AirQualityCurrent>,
) -> EnvironmentalRecord {
    let weather = weather.unwrap_or_default();
    let air_quality = air_quality.unwrap_or_default();

    EnvironmentalRecord {
        actual_temperature_celsius: weather.temperature_2m,
        apparent_temperature_celsius: weather.apparent_temperature,
        relative_humidity_percent: weather.relative_humidity_2m,
        weather_time: weather.time,
        us_aqi: air_quality.us_aqi,
        pm25: air_quality.pm2_5,
        ozone: air_quality.ozone,
        aqi_time: air_quality.time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_current_reads_nested_block() {
        let body = r#"{
            "latitude": 48.86, "longitude": 2.34, "timezone": "Europe/Paris",
            "current": { "time": "2025-06-01T14:00", "interval": 900,
                         "temperature_2m": 24.3, "relative_humidity_2m": 41,
                         "apparent_temperature": 22.0 }
        }"#;

        let current: WeatherCurrent = parse_current("forecast", body).unwrap().unwrap();
        assert_eq!(current.temperature_2m, Some(24.3));
        assert_eq!(current.relative_humidity_2m, Some(41.0));
        assert_eq!(current.time.as_deref(), Some("2025-06-01T14:00"));
    }

    #[test]
    fn parse_current_tolerates_missing_block() {
        let body = r#"{ "latitude": 48.86, "longitude": 2.34 }"#;
        let current: Option<AirQualityCurrent> = parse_current("air-quality", body).unwrap();
        assert!(current.is_none());
    }

    #[test]
    fn parse_current_tolerates_null_fields() {
        let body = r#"{ "current": { "time": "2025-06-01T14:00", "us_aqi": null, "pm2_5": 8.1 } }"#;
        let current: AirQualityCurrent = parse_current("air-quality", body).unwrap().unwrap();
        assert_eq!(current.us_aqi, None);
        assert_eq!(current.pm2_5, Some(8.1));
        assert_eq!(current.ozone, None);
    }

    #[test]
    fn parse_current_rejects_garbage() {
        let err = parse_current::<WeatherCurrent>("forecast", "not json").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { endpoint: "forecast", .. }));
    }

    #[test]
    fn parse_current_rejects_wrong_shape() {
        let body = r#"{ "current": { "temperature_2m": "hot" } }"#;
        assert!(parse_current::<WeatherCurrent>("forecast", body).is_err());
    }

    #[test]
    fn merge_maps_fields() {
        let record = merge(
            Some(WeatherCurrent {
                time: Some("2025-06-01T14:00".into()),
                temperature_2m: Some(24.3),
                relative_humidity_2m: Some(41.0),
                apparent_temperature: Some(22.0),
            }),
            Some(AirQualityCurrent {
                time: Some("2025-06-01T14:00".into()),
                us_aqi: Some(42.0),
                pm2_5: Some(8.1),
                ozone: Some(60.0),
            }),
        );

        assert_eq!(record.actual_temperature_celsius, Some(24.3));
        assert_eq!(record.apparent_temperature_celsius, Some(22.0));
        assert_eq!(record.relative_humidity_percent, Some(41.0));
        assert_eq!(record.us_aqi, Some(42.0));
        assert_eq!(record.pm25, Some(8.1));
        assert_eq!(record.ozone, Some(60.0));
    }

    #[test]
    fn merge_degrades_missing_weather_only() {
        let record = merge(
            None,
            Some(AirQualityCurrent {
                time: None,
                us_aqi: Some(42.0),
                pm2_5: Some(8.1),
                ozone: Some(60.0),
            }),
        );

        assert!(record.has_air_quality());
        assert!(!record.has_weather());
        assert_eq!(record.weather_time, None);
    }
}
