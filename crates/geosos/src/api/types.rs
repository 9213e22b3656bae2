// Rust guideline compliant 2026-10-16

//! Request and response bodies of the HTTP surface.

use std::sync::Arc;

use dispatcher::{AlertRequest, Dispatcher};
use domain::Coordinates;
use serde::{Deserialize, Serialize};

/// Shared handler state: the dispatcher (which also owns the geocoder) and
/// the place search.
#[derive(Debug)]
pub struct AppState<G, S, P, R> {
    /// Alert pipeline; also serves standalone geocoding.
    pub dispatcher: Arc<Dispatcher<G, P, R>>,
    /// Nearby hospital search.
    pub places: Arc<S>,
}

impl<G, S, P, R> AppState<G, S, P, R> {
    /// Wrap both components for sharing across handlers.
    #[must_use]
    pub fn new(dispatcher: Dispatcher<G, P, R>, places: S) -> Self {
        Self { dispatcher: Arc::new(dispatcher), places: Arc::new(places) }
    }
}

// Manual impl: derive would require every adapter type to be `Clone`.
impl<G, S, P, R> Clone for AppState<G, S, P, R> {
    fn clone(&self) -> Self {
        Self { dispatcher: Arc::clone(&self.dispatcher), places: Arc::clone(&self.places) }
    }
}

/// Body of `/api/location` and the hospital endpoints.
#[derive(Debug, Deserialize)]
pub struct LocationBody {
    /// Decimal degrees; absent is rejected with 400.
    pub latitude: Option<f64>,
    /// Decimal degrees; absent is rejected with 400.
    pub longitude: Option<f64>,
}

/// Body of `/api/sendsms`.
#[derive(Debug, Deserialize)]
pub struct AlertBody {
    /// Decimal degrees; absent is rejected with 400.
    pub latitude: Option<f64>,
    /// Decimal degrees; absent is rejected with 400.
    pub longitude: Option<f64>,
    /// Free text; blank or absent uses the default alert text.
    pub message: Option<String>,
}

impl From<AlertBody> for AlertRequest {
    fn from(body: AlertBody) -> Self {
        Self { latitude: body.latitude, longitude: body.longitude, message: body.message }
    }
}

/// Answer of `/api/location`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Echo of the validated input.
    pub coordinates: Coordinates,
    /// First geocoding match, or `Address not found`.
    pub user_address: String,
}

/// Answer of `/api/sendsms`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
    /// Omitted when the publisher returned no identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Answer of `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` while the process serves requests.
    pub status: &'static str,
}
