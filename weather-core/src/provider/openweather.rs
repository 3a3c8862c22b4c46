use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::{LookupError, Service},
    model::ForecastResult,
    provider::{REQUEST_TIMEOUT, decode_body, http_client},
};

use super::Forecaster;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const SERVICE: Service = Service::Weather;

#[derive(Debug, Clone)]
pub struct OpenWeatherForecaster {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherForecaster {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    pub fn with_endpoint(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { api_key, base_url, http: http_client(timeout)? })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn normalize(self) -> Result<ForecastResult, LookupError> {
        if self.main.humidity > 100 {
            return Err(LookupError::malformed(
                SERVICE,
                format!("humidity {}% is out of range", self.main.humidity),
            ));
        }

        let condition_description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| LookupError::malformed(SERVICE, "no condition description"))?;

        Ok(ForecastResult {
            temperature_c: round_celsius(self.main.temp),
            feels_like_c: round_celsius(self.main.feels_like),
            humidity_pct: self.main.humidity,
            condition_description,
            station_name: self.name,
        })
    }
}

/// Nearest whole degree, halves rounded up (-2.5 becomes -2).
fn round_celsius(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

fn classify_status(status: StatusCode) -> LookupError {
    match status {
        StatusCode::UNAUTHORIZED => LookupError::InvalidCredential { service: SERVICE },
        StatusCode::NOT_FOUND => {
            LookupError::not_found(SERVICE, "Location not found by weather service.")
        }
        other => LookupError::Upstream { service: SERVICE, status: other.as_u16() },
    }
}

#[async_trait]
impl Forecaster for OpenWeatherForecaster {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResult, LookupError> {
        tracing::debug!(latitude, longitude, "fetching current conditions");

        let url = format!("{}/data/2.5/weather", self.base_url);
        let (lat, lon) = (latitude.to_string(), longitude.to_string());

        let res = self
            .http
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::from_transport(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "weather request rejected");
            return Err(classify_status(status));
        }

        let parsed: OwCurrentResponse = decode_body(SERVICE, res).await?;
        parsed.normalize()
    }
}
