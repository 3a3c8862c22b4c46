use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use weather_core::{ErrorKind, LookupError, WeatherLookup, WeatherReport};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    location: Option<String>,
}

/// Envelope for every `/api/weather` response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WeatherReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ApiResponse {
    fn ok(report: WeatherReport) -> Self {
        Self { success: true, data: Some(report), error: None, kind: None }
    }

    fn bad_request(message: &str) -> Self {
        Self { success: false, data: None, error: Some(message.to_string()), kind: None }
    }

    fn lookup_failed(err: &LookupError) -> Self {
        Self { success: false, data: None, error: Some(err.to_string()), kind: Some(err.kind()) }
    }
}

pub fn router(lookup: Arc<WeatherLookup>) -> Router {
    Router::new().route("/weather", get(get_weather)).with_state(lookup)
}

async fn get_weather(
    State(lookup): State<Arc<WeatherLookup>>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let location = match query {
        Ok(Query(query)) => query.location.filter(|l| !l.is_empty()),
        Err(rejection) => {
            tracing::debug!("rejected weather query: {rejection}");
            None
        }
    };

    let Some(location) = location else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::bad_request("Location parameter is required")),
        );
    };

    match lookup.lookup_weather(&location).await {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::ok(report))),
        Err(err) => {
            tracing::warn!(%location, kind = ?err.kind(), "weather lookup failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::lookup_failed(&err)))
        }
    }
}
