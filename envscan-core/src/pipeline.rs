use anyhow::Context;
use tracing::{info, instrument};

use crate::{
    config::Config,
    error::AnalysisError,
    geocoder::{Geocoder, NominatimGeocoder},
    model::Analysis,
    provider::{EnvironmentSource, OpenMeteoClient},
};

/// Place name → coordinates → merged record.
#[derive(Debug)]
pub struct Analyzer {
    geocoder: Box<dyn Geocoder>,
    source: Box<dyn EnvironmentSource>,
}

impl Analyzer {
    pub fn new(geocoder: Box<dyn Geocoder>, source: Box<dyn EnvironmentSource>) -> Self {
        Self { geocoder, source }
    }

    /// Wire the Nominatim geocoder and the Open-Meteo client from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoder =
            NominatimGeocoder::from_config(config).context("Failed to build geocoding client")?;
        let source =
            OpenMeteoClient::from_config(config).context("Failed to build Open-Meteo client")?;

        Ok(Self::new(Box::new(geocoder), Box::new(source)))
    }

    /// Run one place name through the pipeline.
    ///
    /// Blank input is rejected before any network call, and nothing is
    /// fetched when geocoding fails.
    #[instrument(skip(self))]
    pub async fn analyze(&self, place: &str) -> Result<Analysis, AnalysisError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(AnalysisError::MissingLocation);
        }

        let coordinates = self.geocoder.resolve(place).await?;
        let record = self.source.fetch(coordinates).await?;

        info!(
            weather = record.has_weather(),
            air_quality = record.has_air_quality(),
            "data fetching finished"
        );

        Ok(Analysis { place: place.to_string(), coordinates, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::{AqiCategory, HeatStress},
        model::{Coordinates, EnvironmentalRecord},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct Calls {
        geocode: AtomicUsize,
        fetch: AtomicUsize,
    }

    #[derive(Debug)]
    struct FixedGeocoder {
        answer: Option<Coordinates>,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, place: &str) -> Result<Coordinates, AnalysisError> {
            self.calls.geocode.fetch_add(1, Ordering::SeqCst);
            self.answer.ok_or_else(|| AnalysisError::LocationNotFound { place: place.into() })
        }
    }

    #[derive(Debug)]
    struct FixedSource {
        record: EnvironmentalRecord,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl EnvironmentSource for FixedSource {
        async fn fetch(&self, _coords: Coordinates) -> Result<EnvironmentalRecord, AnalysisError> {
            self.calls.fetch.fetch_add(1, Ordering::SeqCst);
            Ok(self.record.clone())
        }
    }

    fn analyzer(answer: Option<Coordinates>, record: EnvironmentalRecord) -> (Analyzer, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let analyzer = Analyzer::new(
            Box::new(FixedGeocoder { answer, calls: calls.clone() }),
            Box::new(FixedSource { record, calls: calls.clone() }),
        );
        (analyzer, calls)
    }

    fn paris() -> Option<Coordinates> {
        Coordinates::new(48.85, 2.35)
    }

    #[tokio::test]
    async fn blank_input_makes_no_calls() {
        let (analyzer, calls) = analyzer(paris(), EnvironmentalRecord::default());

        for input in ["", "   "] {
            let err = analyzer.analyze(input).await.unwrap_err();
            assert!(matches!(err, AnalysisError::MissingLocation));
            assert_eq!(err.user_message(), "Location is required");
        }

        assert_eq!(calls.geocode.load(Ordering::SeqCst), 0);
        assert_eq!(calls.fetch.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unresolved_place_skips_fetch() {
        let (analyzer, calls) = analyzer(None, EnvironmentalRecord::default());

        let err = analyzer.analyze("Qwxzv").await.unwrap_err();

        assert_eq!(err.user_message(), "Could not find coordinates for the location");
        assert_eq!(calls.geocode.load(Ordering::SeqCst), 1);
        assert_eq!(calls.fetch.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn paris_is_good_and_comfortable() {
        let record = EnvironmentalRecord {
            us_aqi: Some(42.0),
            pm25: Some(8.1),
            ozone: Some(60.0),
            apparent_temperature_celsius: Some(22.0),
            ..Default::default()
        };
        let (analyzer, calls) = analyzer(paris(), record.clone());

        let analysis = analyzer.analyze("  Paris, France ").await.expect("analysis succeeds");

        assert_eq!(analysis.place, "Paris, France");
        assert!((analysis.coordinates.latitude - 48.85).abs() < 0.01);
        assert!((analysis.coordinates.longitude - 2.35).abs() < 0.01);
        assert_eq!(analysis.record, record);
        assert_eq!(AqiCategory::classify(analysis.record.us_aqi), Some(AqiCategory::Good));
        assert_eq!(
            HeatStress::classify(analysis.record.apparent_temperature_celsius),
            Some(HeatStress::Comfortable)
        );
        assert_eq!(calls.fetch.load(Ordering::SeqCst), 1);
    }
}
