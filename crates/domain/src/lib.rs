// Rust guideline compliant 2026-10-16

//! Shared domain types for the GeoSOS alert backend.
//!
//! Defines `Coordinates`, `AlertEvent`, `Place`, the per-port error enums, and
//! the hexagonal port traits: `Geocoder`, `PlaceSearch`, `Publisher`, and
//! `Recorder`. All components depend on this crate; no other workspace crate is
//! imported here.

mod geo;

pub use geo::{EARTH_RADIUS_KM, RankedPlace, haversine_km, rank_by_distance};

use std::future::Future;

use serde::Serialize;

/// Address shown by the standalone lookup endpoint when the geocoder finds nothing.
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Address embedded in a dispatched alert when geocoding fails or finds nothing.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Persisted in place of a notification identifier the publisher did not return.
pub const NOTIFICATION_ID_NONE: &str = "N/A";

/// Search radius for the nearby-hospital lookup, in meters.
pub const HOSPITAL_SEARCH_RADIUS_M: u32 = 5_000;

/// Place category for the nearby-hospital lookup.
pub const HOSPITAL_CATEGORY: &str = "hospital";

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A validated point on the globe, in decimal degrees.
///
/// Both components are finite; latitude is in `[-90, 90]` and longitude in
/// `[-180, 180]`. The only way to obtain a value is [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Reasons a latitude/longitude pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinatesError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinates must be finite")]
    NotFinite,
    /// Latitude is outside `[-90, 90]`.
    #[error("latitude {latitude} outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending value.
        latitude: f64,
    },
    /// Longitude is outside `[-180, 180]`.
    #[error("longitude {longitude} outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending value.
        longitude: f64,
    },
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    ///
    /// Zero is a legitimate value on both axes (equator, prime meridian).
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesError`] when either component is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinatesError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange { latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange { longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

// ---------------------------------------------------------------------------
// AlertEvent / Place
// ---------------------------------------------------------------------------

/// Durable record of one dispatched alert. Written once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    /// Generated once at dispatch start.
    pub event_id: uuid::Uuid,
    /// Fixed-offset local time, second precision (e.g. `10/16/2026, 09:41:07 PM`).
    pub timestamp: String,
    /// Resolved street address, or [`UNKNOWN_LOCATION`].
    pub address: String,
    /// Where the alert was raised.
    pub coordinates: Coordinates,
    /// Message typed by the user, or the default alert text.
    pub user_message: String,
    /// Identifier returned by the publisher, or [`NOTIFICATION_ID_NONE`].
    pub notification_id: String,
}

/// A place returned by a nearby search.
///
/// `raw` keeps the upstream entry verbatim so it can be relayed unmodified;
/// the other fields are parsed out of it for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Display name.
    pub name: String,
    /// Short address ("vicinity").
    pub vicinity: String,
    /// `None` when the upstream entry carries no usable location.
    pub location: Option<Coordinates>,
    /// Upstream JSON object for this place.
    pub raw: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Errors from the Geocoder hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    /// Transport failure, non-2xx status, or an upstream error status.
    #[error("geocoding unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
    /// Upstream body could not be decoded.
    #[error("geocoding response malformed: {reason}")]
    Malformed {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the `PlaceSearch` hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceSearchError {
    /// Transport failure, non-2xx status, or an upstream error status.
    #[error("place search unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
    /// Upstream body could not be decoded.
    #[error("place search response malformed: {reason}")]
    Malformed {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the Publisher hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PublishError {
    /// Upstream answered but refused the message (auth, throttling, bad topic).
    #[error("publish rejected with status {status}: {reason}")]
    Rejected {
        /// HTTP status returned by the upstream.
        status: u16,
        /// Human-readable description.
        reason: String,
    },
    /// Upstream could not be reached.
    #[error("publish unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
}

/// Errors from the Recorder hexagonal port.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A record with this event id already exists.
    #[error("alert event {event_id} already recorded")]
    Duplicate {
        /// Conflicting identifier.
        event_id: uuid::Uuid,
    },
    /// The store could not accept the write.
    #[error("record store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------
//
// Methods return `impl Future + Send` rather than using `async fn` so that the
// dispatch future stays `Send` when it runs inside an HTTP handler. Adapters
// still implement them with plain `async fn`.

/// Hexagonal port: coordinates to street address.
pub trait Geocoder {
    /// Resolve `coordinates` to the first matching formatted address.
    ///
    /// Returns `Ok(None)` when the upstream succeeded with zero results. Call
    /// sites pick their own fallback text.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] when the upstream cannot be reached or answers
    /// with something other than a result list.
    fn geocode(
        &self,
        coordinates: &Coordinates,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;
}

/// Hexagonal port: nearby places of one category.
pub trait PlaceSearch {
    /// List places of `category` within `radius_m` meters of `coordinates`.
    ///
    /// The upstream order is preserved; no filtering or sorting happens here.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceSearchError`] on any upstream failure.
    fn search_nearby(
        &self,
        coordinates: &Coordinates,
        radius_m: u32,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Place>, PlaceSearchError>> + Send;
}

/// Hexagonal port: pub/sub notification delivery.
pub trait Publisher {
    /// Publish `body` to `topic`.
    ///
    /// Returns the upstream message identifier, or `None` if the upstream
    /// accepted the message without one.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the message was not accepted. No retry is
    /// attempted.
    fn publish(
        &self,
        topic: &str,
        body: &str,
    ) -> impl Future<Output = Result<Option<String>, PublishError>> + Send;
}

/// Hexagonal port: append-only alert log.
pub trait Recorder {
    /// Persist one alert event.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the event could not be stored.
    fn put(&self, event: &AlertEvent) -> impl Future<Output = Result<(), RecordError>> + Send;
}
