use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::{
    GooglePlacesRepo, PlacesError, PlacesSettings, API_KEY_SETTING,
};

pub mod error;
pub mod google_places_api;
pub mod health_check;
pub mod reservation_controller;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    pub places_settings: Arc<PlacesSettings>,
    pub http_client: reqwest::Client,
    pub reservation_delay: Duration,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Error building the Google Places HTTP client")?;

        Ok(Self {
            places_settings: Arc::new(config.places_settings()),
            http_client,
            reservation_delay: Duration::from_millis(config.reservation_delay_ms),
        })
    }

    /// A fresh wrapper per call, fails when the api key is not configured.
    pub fn places_repo(&self) -> Result<GooglePlacesRepo, PlacesError> {
        GooglePlacesRepo::new(&self.places_settings, self.http_client.clone())
    }
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::new(config)?;
    if !app_state.places_settings.has_api_key() {
        warn!("{} is not set, every places request will fail with 500", API_KEY_SETTING);
    }

    let application = app(app_state, config)?;

    let ip = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid host address: {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    info!("API server listening on: {}", addr);
    axum::Server::bind(&addr)
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

/// Full application: every endpoint plus CORS, compression and the fallback.
pub fn app(app_state: AppState, config: &Config) -> anyhow::Result<Router> {
    let origins = config
        .origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin url: {}", s))
        })
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    let application = router_endpoints(app_state)
        .fallback(page_not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        );

    Ok(application)
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .nest("/api/places", google_places_api::router(app_state.clone()))
        .nest("/api/restaurants", restaurant_controller::router(app_state.clone()))
        .nest("/api/reservations", reservation_controller::router(app_state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for the shutdown signal due to: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping API server");
}
