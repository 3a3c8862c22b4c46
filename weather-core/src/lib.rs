//! Core library for the `weather` CLI and web server.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Geocoding and current-conditions provider clients
//! - The lookup pipeline that composes them, and its error taxonomy
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::{Config, Credentials, ProviderConfig};
pub use error::{ErrorKind, LookupError, Service};
pub use lookup::WeatherLookup;
pub use model::{Coordinates, ForecastResult, GeocodeResult, WeatherReport};
pub use provider::{Forecaster, Geocoder, ProviderId};
