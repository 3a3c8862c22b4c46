use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{LookupError, Service},
    model::GeocodeResult,
    provider::{REQUEST_TIMEOUT, decode_body, http_client},
};

use super::Geocoder;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";
const SERVICE: Service = Service::Geocoding;

/// Forward geocoding against the Mapbox places endpoint.
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    access_token: String,
    base_url: String,
    http: Client,
}

impl MapboxGeocoder {
    pub fn new(access_token: String) -> anyhow::Result<Self> {
        Self::with_endpoint(access_token, DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Point the client at another host (a mock server, a proxy) with its own timeout.
    pub fn with_endpoint(
        access_token: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { access_token, base_url, http: http_client(timeout)? })
    }

    fn search_url(&self, location: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(location)
        )
    }
}

#[derive(Debug, Deserialize)]
struct MbFeature {
    /// `[longitude, latitude]`
    center: (f64, f64),
    place_name: String,
}

#[derive(Debug, Deserialize)]
struct MbResponse {
    features: Vec<MbFeature>,
}

impl MbFeature {
    fn into_result(self) -> Result<GeocodeResult, LookupError> {
        let (longitude, latitude) = self.center;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LookupError::malformed(
                SERVICE,
                format!("coordinates out of range: lat {latitude}, lon {longitude}"),
            ));
        }

        let display_name = self.place_name.trim();
        if display_name.is_empty() {
            return Err(LookupError::malformed(SERVICE, "match has no place name"));
        }

        Ok(GeocodeResult { latitude, longitude, display_name: display_name.to_string() })
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn geocode(&self, location: &str) -> Result<GeocodeResult, LookupError> {
        tracing::debug!(location, "geocoding location");

        let res = self
            .http
            .get(self.search_url(location))
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| LookupError::from_transport(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "geocoding request rejected");
            return Err(LookupError::Upstream { service: SERVICE, status: status.as_u16() });
        }

        let parsed: MbResponse = decode_body(SERVICE, res).await?;

        let feature = parsed.features.into_iter().next().ok_or_else(|| {
            LookupError::not_found(SERVICE, "Unable to find location. Try another search.")
        })?;

        feature.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(center: (f64, f64), place_name: &str) -> MbFeature {
        MbFeature { center, place_name: place_name.to_string() }
    }

    #[test]
    fn center_is_swapped_into_lat_lon() {
        let result = feature((-0.1276, 51.5072), "London, England, United Kingdom")
            .into_result()
            .unwrap();

        assert_eq!(result.latitude, 51.5072);
        assert_eq!(result.longitude, -0.1276);
        assert_eq!(result.display_name, "London, England, United Kingdom");
    }

    #[test]
    fn out_of_range_latitude_is_malformed() {
        // A provider that sent [lat, lon] for a high-longitude place.
        let err = feature((35.6762, 139.6503), "Tokyo").into_result().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unknown);
    }

    #[test]
    fn blank_place_name_is_malformed() {
        let err = feature((2.3522, 48.8566), "  ").into_result().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unknown);
    }

    #[test]
    fn search_url_encodes_query_into_path() {
        let geocoder =
            MapboxGeocoder::with_endpoint("t".into(), "http://localhost:1234/", REQUEST_TIMEOUT)
                .unwrap();

        assert_eq!(
            geocoder.search_url("1600 Amphitheatre Parkway"),
            "http://localhost:1234/geocoding/v5/mapbox.places/1600%20Amphitheatre%20Parkway.json"
        );
    }
}
