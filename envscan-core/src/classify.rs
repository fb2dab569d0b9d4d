//! Human-readable risk buckets for a merged record.
//!
//! Pure and total: absent input yields `None`, never a default bucket.

use serde::Serialize;
use std::fmt;

use crate::model::EnvironmentalRecord;

/// Heat-stress proxy derived from apparent temperature (°C), loosely after
/// the NOAA heat index caution level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatStress {
    Comfortable,
    Warm,
    Caution,
}

impl HeatStress {
    pub fn classify(apparent_celsius: Option<f64>) -> Option<Self> {
        let t = apparent_celsius?;
        Some(if t > 32.0 {
            HeatStress::Caution
        } else if t > 27.0 {
            HeatStress::Warm
        } else {
            HeatStress::Comfortable
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeatStress::Comfortable => "generally comfortable or cool",
            HeatStress::Warm => "becoming noticeably warm/humid",
            HeatStress::Caution => "caution or higher risk",
        }
    }

    /// Sentence used by the console report.
    pub fn interpretation(&self) -> &'static str {
        match self {
            HeatStress::Comfortable => "Generally comfortable or cool.",
            HeatStress::Warm => "Becoming noticeably warm/humid.",
            HeatStress::Caution => "Heat index suggests caution or higher risk.",
        }
    }
}

/// US EPA Air Quality Index category. Buckets are closed at the upper end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn classify(us_aqi: Option<f64>) -> Option<Self> {
        let aqi = us_aqi?;
        Some(match aqi {
            a if a <= 50.0 => AqiCategory::Good,
            a if a <= 100.0 => AqiCategory::Moderate,
            a if a <= 150.0 => AqiCategory::UnhealthyForSensitiveGroups,
            a if a <= 200.0 => AqiCategory::Unhealthy,
            a if a <= 300.0 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for HeatStress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for HeatStress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl Serialize for AqiCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Both classifications for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub heat_stress: Option<HeatStress>,
    pub aqi_category: Option<AqiCategory>,
}

impl Classification {
    pub fn of(record: &EnvironmentalRecord) -> Self {
        Self {
            heat_stress: HeatStress::classify(record.apparent_temperature_celsius),
            aqi_category: AqiCategory::classify(record.us_aqi),
        }
    }
}
