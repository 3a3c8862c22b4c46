use serde::{Deserialize, Serialize};

/// Best geocoding match for a free-text location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Current conditions at a coordinate, already normalized to whole degrees Celsius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastResult {
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub humidity_pct: u8,
    pub condition_description: String,
    pub station_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What every front door receives on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    #[serde(rename = "temperature")]
    pub temperature_c: i32,
    #[serde(rename = "feelsLike")]
    pub feels_like_c: i32,
    #[serde(rename = "humidity")]
    pub humidity_pct: u8,
    pub description: String,
    pub station_name: String,
    pub summary: String,
    pub coordinates: Coordinates,
    pub full_location: String,
}

impl WeatherReport {
    pub fn new(place: GeocodeResult, conditions: ForecastResult) -> Self {
        let summary = Self::summary_for(&conditions);

        Self {
            location: place.display_name.clone(),
            temperature_c: conditions.temperature_c,
            feels_like_c: conditions.feels_like_c,
            humidity_pct: conditions.humidity_pct,
            description: conditions.condition_description,
            station_name: conditions.station_name,
            summary,
            coordinates: Coordinates { latitude: place.latitude, longitude: place.longitude },
            full_location: place.display_name,
        }
    }

    pub fn summary_for(conditions: &ForecastResult) -> String {
        format!(
            "{}. It is currently {}°C (feels like {}°C) with {}% humidity.",
            conditions.condition_description,
            conditions.temperature_c,
            conditions.feels_like_c,
            conditions.humidity_pct,
        )
    }
}
