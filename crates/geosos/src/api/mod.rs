// Rust guideline compliant 2026-10-16

//! HTTP surface (primary adapter).
//!
//! Routes:
//! - `GET  /health`
//! - `POST /api/location`          reverse geocoding
//! - `POST /api/hospitals`         raw nearby hospitals
//! - `POST /api/hospitals/nearest` hospitals ranked by distance
//! - `POST /api/sendsms`           full alert dispatch
//!
//! Every error answer has the shape `{ "error": "..." }`.

pub mod endpoints;
pub mod error;
pub mod types;

use axum::Router;
use axum::routing::{get, post};
use domain::{Geocoder, PlaceSearch, Publisher, Recorder};
use tower_http::cors::CorsLayer;

pub use types::AppState;

/// Build the router over `state`. Cross-origin requests are allowed from any
/// origin so the browser client can be served from elsewhere.
pub fn router<G, S, P, R>(state: AppState<G, S, P, R>) -> Router
where
    G: Geocoder + Send + Sync + 'static,
    S: PlaceSearch + Send + Sync + 'static,
    P: Publisher + Send + Sync + 'static,
    R: Recorder + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(endpoints::health))
        .route("/api/location", post(endpoints::location::<G, S, P, R>))
        .route("/api/hospitals", post(endpoints::hospitals::<G, S, P, R>))
        .route("/api/hospitals/nearest", post(endpoints::nearest_hospitals::<G, S, P, R>))
        .route("/api/sendsms", post(endpoints::send_sms::<G, S, P, R>))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
