use serde::Serialize;
use thiserror::Error;

/// Upstream service a lookup talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Geocoding,
    Weather,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Geocoding => "geocoding",
            Service::Weather => "weather",
        }
    }

    fn unreachable_message(&self) -> &'static str {
        match self {
            Service::Geocoding => "Unable to connect to location services!",
            Service::Weather => "Unable to connect to weather service!",
        }
    }

    fn status_label(&self) -> &'static str {
        match self {
            Service::Geocoding => "Geocoding service error",
            Service::Weather => "Weather service error",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    InvalidCredential,
    UpstreamError,
    UpstreamUnreachable,
    Unknown,
}

/// Every failure a lookup can end with.
///
/// Provider clients classify failures into exactly one variant before
/// returning; the pipeline only forwards them. The `Display` output is a
/// single sentence meant to be shown to the end user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Location must not be empty.")]
    InvalidInput,

    #[error("{message}")]
    NotFound { service: Service, message: String },

    #[error("Invalid API key for {service} service.")]
    InvalidCredential { service: Service },

    #[error("{}: {status}", .service.status_label())]
    Upstream { service: Service, status: u16 },

    #[error("{}", .service.unreachable_message())]
    Unreachable { service: Service },

    #[error("{message}")]
    Unknown { message: String },
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidInput => ErrorKind::InvalidInput,
            LookupError::NotFound { .. } => ErrorKind::NotFound,
            LookupError::InvalidCredential { .. } => ErrorKind::InvalidCredential,
            LookupError::Upstream { .. } => ErrorKind::UpstreamError,
            LookupError::Unreachable { .. } => ErrorKind::UpstreamUnreachable,
            LookupError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn not_found(service: Service, message: impl Into<String>) -> Self {
        LookupError::NotFound { service, message: message.into() }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        LookupError::Unknown { message: message.into() }
    }

    /// Payload that arrived with a success status but could not be used.
    pub fn malformed(service: Service, detail: impl std::fmt::Display) -> Self {
        LookupError::unknown(format!("Unexpected response from the {service} service: {detail}"))
    }

    /// Classify a transport failure raised before a usable response arrived.
    pub fn from_transport(service: Service, err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return LookupError::Unreachable { service };
        }

        match err.status() {
            Some(status) => LookupError::Upstream { service, status: status.as_u16() },
            None => LookupError::unknown(format!("{} request failed: {err}", service.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_single_sentences() {
        assert_eq!(
            LookupError::Upstream { service: Service::Geocoding, status: 503 }.to_string(),
            "Geocoding service error: 503"
        );
        assert_eq!(
            LookupError::Unreachable { service: Service::Weather }.to_string(),
            "Unable to connect to weather service!"
        );
        assert_eq!(
            LookupError::InvalidCredential { service: Service::Weather }.to_string(),
            "Invalid API key for weather service."
        );
        assert_eq!(LookupError::InvalidInput.to_string(), "Location must not be empty.");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(LookupError::InvalidInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            LookupError::not_found(Service::Geocoding, "nope").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            LookupError::Upstream { service: Service::Weather, status: 500 }.kind(),
            ErrorKind::UpstreamError
        );
        assert_eq!(
            LookupError::Unreachable { service: Service::Geocoding }.kind(),
            ErrorKind::UpstreamUnreachable
        );
        assert_eq!(LookupError::unknown("boom").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn malformed_keeps_detail_for_diagnostics() {
        let err = LookupError::malformed(Service::Weather, "missing field `main`");
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.to_string().contains("missing field `main`"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::UpstreamUnreachable).unwrap();
        assert_eq!(json, "\"upstream_unreachable\"");
    }
}
