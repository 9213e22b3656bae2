// Rust guideline compliant 2026-10-16

//! Google Geocoding adapter for the `Geocoder` port.
//!
//! Issues `GET /maps/api/geocode/json?latlng=..` and keeps only the first
//! result's `formatted_address`.

use domain::{Coordinates, GeocodeError, Geocoder};
use serde::Deserialize;

use super::google::{GoogleApi, lat_lng, status_failure};

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// `Geocoder` adapter backed by the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    api: GoogleApi,
}

impl GoogleGeocoder {
    /// Create a geocoder using `api` settings.
    #[must_use]
    pub fn new(api: GoogleApi) -> Self {
        Self { api }
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
}

impl Geocoder for GoogleGeocoder {
    /// Reverse-geocode `coordinates`; first result wins.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::Unavailable` on transport failure or a non-2xx
    /// status, and `GeocodeError::Malformed` when the body is not the expected
    /// JSON. An error `status` inside a 2xx body is logged and yields whatever
    /// results came with it, normally none.
    async fn geocode(&self, coordinates: &Coordinates) -> Result<Option<String>, GeocodeError> {
        let response = self
            .api
            .get(GEOCODE_PATH)
            .query(&[("latlng", lat_lng(coordinates))])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "geocoder.request.failed");
                GeocodeError::Unavailable { reason: e.to_string() }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "geocoder.request.rejected");
            return Err(GeocodeError::Unavailable { reason: format!("HTTP {status}") });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Malformed { reason: e.to_string() })?;

        // An error status still carries a well-formed (usually empty) result list.
        if let Some(reason) = status_failure(body.status.as_deref(), body.error_message.as_deref()) {
            tracing::warn!(%reason, "geocoder.status.failed");
        }

        let address = body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.formatted_address)
            .filter(|a| !a.is_empty());
        tracing::debug!(found = address.is_some(), "geocoder.lookup.done");
        Ok(address)
    }
}
