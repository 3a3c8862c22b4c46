//! Canned providers for router tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{body::Body, response::Response};
use http_body_util::BodyExt;
use weather_core::{
    ForecastResult, Forecaster, GeocodeResult, Geocoder, LookupError, Service, WeatherLookup,
};

/// Knows only "Paris"; counts every provider call.
#[derive(Debug, Clone, Default)]
pub struct StubLookup {
    calls: Arc<AtomicUsize>,
}

impl StubLookup {
    pub fn lookup(&self) -> Arc<WeatherLookup> {
        Arc::new(WeatherLookup::new(
            Box::new(StubGeocoder { calls: self.calls.clone() }),
            Box::new(StubForecaster { calls: self.calls.clone() }),
        ))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct StubGeocoder {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, location: &str) -> Result<GeocodeResult, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if location != "Paris" {
            return Err(LookupError::not_found(
                Service::Geocoding,
                "Unable to find location. Try another search.",
            ));
        }

        Ok(GeocodeResult {
            latitude: 48.8566,
            longitude: 2.3522,
            display_name: "Paris, France".to_string(),
        })
    }
}

#[derive(Debug)]
struct StubForecaster {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Forecaster for StubForecaster {
    async fn forecast(&self, _latitude: f64, _longitude: f64) -> Result<ForecastResult, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(ForecastResult {
            temperature_c: 18,
            feels_like_c: 17,
            humidity_pct: 60,
            condition_description: "clear sky".to_string(),
            station_name: "Paris".to_string(),
        })
    }
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
