use chrono::NaiveDateTime;
use std::fmt;

use crate::{
    classify::{AqiCategory, HeatStress},
    model::Analysis,
};

/// Console rendering of an [`Analysis`].
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    analysis: &'a Analysis,
}

impl<'a> TextReport<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let r = &a.record;

        writeln!(f, "--- Analysis Results for '{}' ({}) ---", a.place, a.coordinates)?;

        writeln!(
            f,
            "\nProxy for Current 'Heat Stress' (Time: {}):",
            format_timestamp(r.weather_time.as_deref())
        )?;
        match (r.apparent_temperature_celsius, HeatStress::classify(r.apparent_temperature_celsius)) {
            (Some(apparent), Some(stress)) => {
                writeln!(f, "  > Apparent Temperature (Feels Like): {apparent:.1} °C")?;
                writeln!(
                    f,
                    "  > Actual Temperature:              {}",
                    with_unit(r.actual_temperature_celsius, 1, "°C")
                )?;
                writeln!(
                    f,
                    "  > Relative Humidity:               {}",
                    with_unit(r.relative_humidity_percent, 0, "%")
                )?;
                writeln!(f, "  Interpretation: {}", stress.interpretation())?;
            }
            _ => writeln!(f, "  Apparent temperature data could not be retrieved.")?,
        }

        writeln!(
            f,
            "\n*Indirect* Proxy related to Local Pollution Sources (Time: {}):",
            format_timestamp(r.aqi_time.as_deref())
        )?;
        writeln!(f, "  (Note: This AQI data is NOT a direct measure of CO2 or carbon emissions,")?;
        writeln!(f, "   but high pollutant levels often correlate with combustion activities.)")?;

        match (r.us_aqi, AqiCategory::classify(r.us_aqi)) {
            (Some(aqi), Some(category)) => {
                writeln!(f, "  > US Air Quality Index (AQI): {aqi:.0}")?;
                writeln!(f, "    Interpretation: {category}")?;
            }
            _ => writeln!(f, "  US AQI data could not be retrieved.")?,
        }

        match r.pm25 {
            Some(pm25) => writeln!(f, "  > PM2.5 Concentration: {pm25:.1} µg/m³")?,
            None => writeln!(f, "  PM2.5 data could not be retrieved.")?,
        }
        match r.ozone {
            Some(ozone) => writeln!(f, "  > Ozone Concentration: {ozone:.1} µg/m³")?,
            None => writeln!(f, "  Ozone data could not be retrieved.")?,
        }

        Ok(())
    }
}

fn with_unit(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.precision$} {unit}"),
        None => "N/A".to_string(),
    }
}

/// Upstream timestamps are local ISO-8601 without offset, e.g.
/// `2025-06-01T14:00`. Unparseable values are shown verbatim.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
