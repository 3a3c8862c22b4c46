use crate::{
    config::Credentials,
    error::{LookupError, Service},
    model::{ForecastResult, GeocodeResult},
    provider::{mapbox::MapboxGeocoder, openweather::OpenWeatherForecaster},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod mapbox;
pub mod openweather;

/// Fixed per-call timeout applied by both provider clients.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Mapbox,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mapbox => "mapbox",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Mapbox, ProviderId::OpenWeather]
    }

    /// Environment variable holding this provider's credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::Mapbox => "MAPBOX_ACCESS_TOKEN",
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mapbox" => Ok(ProviderId::Mapbox),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mapbox, openweather."
            )),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::try_from(s)
    }
}

/// Resolves free text to the provider's best coordinate match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, location: &str) -> Result<GeocodeResult, LookupError>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait Forecaster: Send + Sync + Debug {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResult, LookupError>;
}

pub fn geocoder_from_credentials(credentials: &Credentials) -> anyhow::Result<Box<dyn Geocoder>> {
    let geocoder = MapboxGeocoder::new(credentials.mapbox_access_token.clone())?;
    Ok(Box::new(geocoder))
}

pub fn forecaster_from_credentials(
    credentials: &Credentials,
) -> anyhow::Result<Box<dyn Forecaster>> {
    let forecaster = OpenWeatherForecaster::new(credentials.openweather_api_key.clone())?;
    Ok(Box::new(forecaster))
}

pub(crate) fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Read a success response body and decode it, classifying every failure.
pub(crate) async fn decode_body<T: DeserializeOwned>(
    service: Service,
    response: Response,
) -> Result<T, LookupError> {
    let body = response.text().await.map_err(|e| LookupError::from_transport(service, e))?;

    serde_json::from_str(&body).map_err(|e| LookupError::malformed(service, e))
}
