//! Core library for `envscan`.
//!
//! This crate defines:
//! - Configuration handling
//! - Geocoding of free-text place names
//! - Fetching and merging current weather and air-quality conditions
//! - Heat-stress and AQI classification
//! - Presentation payloads (heatmap figure, map fragment, text report)
//!
//! It is used by `envscan-cli` and `envscan-web`.

pub mod classify;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod provider;
pub mod report;

#[cfg(test)]
mod test_support;

pub use classify::{AqiCategory, Classification, HeatStress};
pub use config::Config;
pub use error::AnalysisError;
pub use geocoder::{Geocoder, NominatimGeocoder};
pub use model::{Analysis, Coordinates, EnvironmentalRecord};
pub use pipeline::Analyzer;
pub use provider::{EnvironmentSource, OpenMeteoClient};
pub use report::TextReport;
