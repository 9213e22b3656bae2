// Rust guideline compliant 2026-10-16

//! Google Places "nearby search" adapter for the `PlaceSearch` port.
//!
//! Entries are relayed verbatim in `Place::raw`; `name`, `vicinity` and
//! `geometry.location` are parsed out alongside for distance ranking.

use domain::{Coordinates, Place, PlaceSearch, PlaceSearchError};
use serde::Deserialize;
use serde_json::Value;

use super::google::{GoogleApi, lat_lng, status_failure};

const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";

/// `PlaceSearch` adapter backed by the Google Places API.
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    api: GoogleApi,
}

impl GooglePlaces {
    /// Create a place search using `api` settings.
    #[must_use]
    pub fn new(api: GoogleApi) -> Self {
        Self { api }
    }
}

#[derive(Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<Value>,
    status: Option<String>,
    error_message: Option<String>,
}

fn place_from_raw(raw: Value) -> Place {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();
    let location = raw.pointer("/geometry/location").and_then(|loc| {
        let lat = loc.get("lat")?.as_f64()?;
        let lng = loc.get("lng")?.as_f64()?;
        Coordinates::new(lat, lng).ok()
    });
    Place { name: text("name"), vicinity: text("vicinity"), location, raw }
}

impl PlaceSearch for GooglePlaces {
    /// Run a nearby search; results keep the upstream order.
    ///
    /// # Errors
    ///
    /// Returns `PlaceSearchError::Unavailable` on transport failure or a
    /// non-2xx status, and `PlaceSearchError::Malformed` when the body is not
    /// the expected JSON. An error `status` inside a 2xx body is logged and
    /// yields whatever results came with it, normally none.
    async fn search_nearby(
        &self,
        coordinates: &Coordinates,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlaceSearchError> {
        let response = self
            .api
            .get(NEARBY_PATH)
            .query(&[
                ("location", lat_lng(coordinates)),
                ("radius", radius_m.to_string()),
                ("type", category.to_owned()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "places.request.failed");
                PlaceSearchError::Unavailable { reason: e.to_string() }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "places.request.rejected");
            return Err(PlaceSearchError::Unavailable { reason: format!("HTTP {status}") });
        }

        let body: NearbyResponse = response
            .json()
            .await
            .map_err(|e| PlaceSearchError::Malformed { reason: e.to_string() })?;

        // An error status still carries a well-formed (usually empty) result list.
        if let Some(reason) = status_failure(body.status.as_deref(), body.error_message.as_deref()) {
            tracing::warn!(%reason, "places.status.failed");
        }

        tracing::debug!(count = body.results.len(), category, "places.search.done");
        Ok(body.results.into_iter().map(place_from_raw).collect())
    }
}
