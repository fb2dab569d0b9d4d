use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::AnalysisError, model::Coordinates};

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

/// Resolves free text to a point.
///
/// Implementations collapse every failure (no match, timeout, transport
/// error, unreadable answer) into [`AnalysisError::LocationNotFound`]; the
/// cause only shows up in the log. No retries.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, place: &str) -> Result<Coordinates, AnalysisError>;
}
