use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Range-checked constructor. Returns `None` for non-finite values or
    /// values outside -90..=90 / -180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        (lat_ok && lon_ok).then_some(Self { latitude, longitude })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat={:.4}, Lon={:.4}", self.latitude, self.longitude)
    }
}

/// Current conditions merged from the weather and air-quality sources.
///
/// Every field is independently optional: a value is `None` when the
/// upstream omitted it or when its whole `current` section was missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRecord {
    pub actual_temperature_celsius: Option<f64>,
    pub apparent_temperature_celsius: Option<f64>,
    pub relative_humidity_percent: Option<f64>,
    pub weather_time: Option<String>,

    pub us_aqi: Option<f64>,
    /// µg/m³
    pub pm25: Option<f64>,
    /// µg/m³
    pub ozone: Option<f64>,
    pub aqi_time: Option<String>,
}

impl EnvironmentalRecord {
    pub fn has_weather(&self) -> bool {
        self.actual_temperature_celsius.is_some()
            || self.apparent_temperature_celsius.is_some()
            || self.relative_humidity_percent.is_some()
    }

    pub fn has_air_quality(&self) -> bool {
        self.us_aqi.is_some() || self.pm25.is_some() || self.ozone.is_some()
    }
}

/// Result of running one place name through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub place: String,
    pub coordinates: Coordinates,
    pub record: EnvironmentalRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_some());
        assert!(Coordinates::new(-90.0, -180.0).is_some());
        assert!(Coordinates::new(48.8566, 2.3522).is_some());
    }

    #[test]
    fn coordinates_reject_out_of_range_and_nan() {
        assert!(Coordinates::new(90.5, 0.0).is_none());
        assert!(Coordinates::new(0.0, -180.01).is_none());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let record = EnvironmentalRecord {
            us_aqi: Some(42.0),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 8);
        assert_eq!(json["us_aqi"], 42.0);
        assert!(json["pm25"].is_null());
        assert!(json["weather_time"].is_null());
        assert!(json["actual_temperature_celsius"].is_null());
    }

    #[test]
    fn section_presence_is_tracked_separately() {
        let record = EnvironmentalRecord {
            pm25: Some(8.1),
            ..Default::default()
        };

        assert!(record.has_air_quality());
        assert!(!record.has_weather());
    }
}
