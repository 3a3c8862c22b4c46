//! The geocode-then-forecast pipeline every front door calls into.

use crate::{
    config::Config,
    error::LookupError,
    model::{GeocodeResult, WeatherReport},
    provider::{Forecaster, Geocoder, forecaster_from_credentials, geocoder_from_credentials},
};

/// Stateless across calls; share one instance between tasks behind an `Arc`.
#[derive(Debug)]
pub struct WeatherLookup {
    geocoder: Box<dyn Geocoder>,
    forecaster: Box<dyn Forecaster>,
}

impl WeatherLookup {
    pub fn new(geocoder: Box<dyn Geocoder>, forecaster: Box<dyn Forecaster>) -> Self {
        Self { geocoder, forecaster }
    }

    /// Validate credentials and build the real provider clients.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let credentials = config.credentials()?;

        Ok(Self::new(
            geocoder_from_credentials(&credentials)?,
            forecaster_from_credentials(&credentials)?,
        ))
    }

    /// Resolve `raw_location`, then fetch current conditions for it.
    ///
    /// Makes exactly two outbound calls on success, none for blank input, and
    /// stops at the first classified failure.
    pub async fn lookup_weather(&self, raw_location: &str) -> Result<WeatherReport, LookupError> {
        self.lookup_weather_with(raw_location, |_| {}).await
    }

    /// Like [`lookup_weather`](Self::lookup_weather), calling `on_resolved`
    /// once geocoding succeeds and before the forecast request goes out.
    pub async fn lookup_weather_with<F>(
        &self,
        raw_location: &str,
        on_resolved: F,
    ) -> Result<WeatherReport, LookupError>
    where
        F: FnOnce(&GeocodeResult) + Send,
    {
        let location = raw_location.trim();
        if location.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        let place = self.geocoder.geocode(location).await?;
        tracing::debug!(
            display_name = %place.display_name,
            latitude = place.latitude,
            longitude = place.longitude,
            "location resolved"
        );
        on_resolved(&place);

        let conditions = self.forecaster.forecast(place.latitude, place.longitude).await?;
        tracing::debug!(description = %conditions.condition_description, "conditions fetched");

        Ok(WeatherReport::new(place, conditions))
    }
}
