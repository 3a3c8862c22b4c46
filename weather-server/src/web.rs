use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use weather_core::WeatherLookup;

use crate::api;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub fn app(lookup: Arc<WeatherLookup>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .nest("/api", api::router(lookup))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn run(addr: SocketAddr, lookup: Arc<WeatherLookup>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Weather app server running at http://{addr}");

    axum::serve(listener, app(lookup))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubLookup, body_json};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn index_serves_browser_page() {
        let app = app(StubLookup::default().lookup());

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = res.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/api/weather?location="));
    }

    #[tokio::test]
    async fn api_is_nested_under_prefix() {
        let app = app(StubLookup::default().lookup());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/weather?location=Paris")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["location"], "Paris, France");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = app(StubLookup::default().lookup());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/weather?location=Paris")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = app(StubLookup::default().lookup());

        let res = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
