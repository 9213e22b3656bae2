// Rust guideline compliant 2026-10-16

//! Alert dispatch pipeline -- validates a location, reverse-geocodes it,
//! composes the alert body, publishes it, and records the event.
//!
//! Entry points: [`Dispatcher::dispatch`], [`Dispatcher::dispatch_at`].
//! Configuration via [`DispatchConfig::builder`].
//!
//! ```text
//! START -> VALIDATE -> GEOCODE -> COMPOSE -> PUBLISH -> RECORD -> DONE
//! ```
//!
//! Geocoding is best-effort; publish and record failures end the dispatch.

use chrono::{DateTime, FixedOffset, Utc};
use domain::{
    AlertEvent, Coordinates, CoordinatesError, Geocoder, NOTIFICATION_ID_NONE, PublishError,
    Publisher, RecordError, Recorder, UNKNOWN_LOCATION,
};
use tracing::Instrument as _;

/// Offset used for alert timestamps unless configured otherwise (UTC-05:00).
pub const DEFAULT_UTC_OFFSET_SECS: i32 = -5 * 3600;

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Errors that end a dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The supplied configuration is invalid.
    #[error("invalid dispatch configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Latitude or longitude was not supplied.
    #[error("missing latitude or longitude")]
    MissingCoordinates,
    /// Latitude or longitude was supplied but is not a valid position.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinatesError),
    /// The notification was not published; nothing was recorded.
    #[error("publish failed: {0}")]
    Publish(PublishError),
    /// The notification went out but the event could not be recorded.
    #[error("record of event {event_id} failed: {source}")]
    Record {
        /// Identifier of the event that was not stored.
        event_id: uuid::Uuid,
        /// Identifier of the notification that was already sent, if any.
        notification_id: Option<String>,
        /// Underlying recorder error.
        source: RecordError,
    },
}

impl DispatchError {
    /// `true` for errors caused by the caller's input rather than an upstream.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCoordinates | Self::InvalidCoordinates(_))
    }
}

/// Turn optional request fields into validated coordinates.
///
/// Only absence counts as missing; `0.0` is a valid latitude or longitude.
///
/// # Errors
///
/// Returns [`DispatchError::MissingCoordinates`] when either value is absent,
/// or [`DispatchError::InvalidCoordinates`] when the pair is out of range.
pub fn require_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinates, DispatchError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(DispatchError::MissingCoordinates);
    };
    Ok(Coordinates::new(latitude, longitude)?)
}

// ---------------------------------------------------------------------------
// DispatchConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Dispatcher`].
///
/// Construct via [`DispatchConfig::builder`].
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Pub/sub topic alerts are published to.
    pub topic: String,
    /// Offset alert timestamps are rendered in.
    pub utc_offset: FixedOffset,
}

/// Builder for [`DispatchConfig`].
///
/// Obtain via [`DispatchConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct DispatchConfigBuilder {
    topic: String,
    utc_offset: Option<FixedOffset>,
}

impl DispatchConfig {
    /// Create a builder. `topic` is the only required parameter.
    ///
    /// Default values: `utc_offset = -05:00`.
    #[must_use]
    pub fn builder(topic: impl Into<String>) -> DispatchConfigBuilder {
        DispatchConfigBuilder { topic: topic.into(), utc_offset: None }
    }
}

impl DispatchConfigBuilder {
    /// Override the timestamp offset.
    #[must_use]
    pub fn utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = Some(utc_offset);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] when `topic` is blank.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<DispatchConfig, DispatchError> {
        if self.topic.trim().is_empty() {
            return Err(DispatchError::InvalidConfig {
                reason: "topic must not be empty".to_owned(),
            });
        }
        let utc_offset = match self.utc_offset {
            Some(offset) => offset,
            None => FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).ok_or_else(|| {
                DispatchError::InvalidConfig { reason: "default offset out of range".to_owned() }
            })?,
        };
        Ok(DispatchConfig { topic: self.topic, utc_offset })
    }
}

// ---------------------------------------------------------------------------
// Request / receipt
// ---------------------------------------------------------------------------

/// One inbound alert, as received from the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertRequest {
    /// Latitude in decimal degrees, if supplied.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, if supplied.
    pub longitude: Option<f64>,
    /// Free-text message; blank or absent falls back to the default text.
    pub message: Option<String>,
}

/// Outcome of a completed dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReceipt {
    /// The event exactly as recorded.
    pub event: AlertEvent,
    /// Identifier returned by the publisher, if it gave one.
    pub notification_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Runs the dispatch pipeline against three injected ports.
///
/// Generic over `G: Geocoder`, `P: Publisher`, and `R: Recorder` for static
/// dispatch. Holds no mutable state; concurrent dispatches are independent.
#[derive(Debug)]
pub struct Dispatcher<G, P, R> {
    config: DispatchConfig,
    geocoder: G,
    publisher: P,
    recorder: R,
}

impl<G, P, R> Dispatcher<G, P, R>
where
    G: Geocoder + Sync,
    P: Publisher + Sync,
    R: Recorder + Sync,
{
    /// Create a dispatcher from `config` and its adapters.
    #[must_use]
    pub fn new(config: DispatchConfig, geocoder: G, publisher: P, recorder: R) -> Self {
        Self { config, geocoder, publisher, recorder }
    }

    /// The geocoder this dispatcher uses, shared with standalone lookups.
    #[must_use]
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatch one alert, stamped with a fresh event id and the current time.
    ///
    /// # Errors
    ///
    /// See [`dispatch_at`](Self::dispatch_at).
    pub async fn dispatch(&self, request: AlertRequest) -> Result<DispatchReceipt, DispatchError> {
        let event_id = uuid::Uuid::new_v4();
        let at = Utc::now().with_timezone(&self.config.utc_offset);
        self.dispatch_at(request, event_id, at).await
    }

    /// Dispatch one alert with a caller-chosen event id and timestamp.
    ///
    /// Stages run strictly in order. A geocoding failure substitutes
    /// [`UNKNOWN_LOCATION`]; every other failure ends the dispatch. When the
    /// record step fails the notification has already been sent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingCoordinates`] or
    /// [`DispatchError::InvalidCoordinates`] before any adapter is called,
    /// [`DispatchError::Publish`] when publishing fails (nothing recorded), or
    /// [`DispatchError::Record`] when the event could not be stored.
    pub async fn dispatch_at(
        &self,
        request: AlertRequest,
        event_id: uuid::Uuid,
        at: DateTime<FixedOffset>,
    ) -> Result<DispatchReceipt, DispatchError> {
        let span = tracing::info_span!("dispatch", %event_id);
        self.run_stages(request, event_id, at).instrument(span).await
    }

    async fn run_stages(
        &self,
        request: AlertRequest,
        event_id: uuid::Uuid,
        at: DateTime<FixedOffset>,
    ) -> Result<DispatchReceipt, DispatchError> {
        let timestamp = composer::format_timestamp(&at);

        // VALIDATE
        let coordinates = require_coordinates(request.latitude, request.longitude)
            .inspect_err(|e| tracing::info!(error = %e, "dispatch.validate.rejected"))?;

        // GEOCODE (best-effort)
        let address = match self.geocoder.geocode(&coordinates).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                tracing::info!("dispatch.geocode.no_results");
                UNKNOWN_LOCATION.to_owned()
            }
            Err(e) => {
                tracing::warn!(error = %e, "dispatch.geocode.failed");
                UNKNOWN_LOCATION.to_owned()
            }
        };

        // COMPOSE
        let user_message = composer::resolve_user_message(request.message.as_deref()).to_owned();
        let body = composer::compose(&address, &user_message, &coordinates, &timestamp);

        // PUBLISH
        let notification_id = self
            .publisher
            .publish(&self.config.topic, &body)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "dispatch.publish.failed");
                DispatchError::Publish(e)
            })?;
        tracing::info!(
            notification_id = notification_id.as_deref().unwrap_or(NOTIFICATION_ID_NONE),
            "dispatch.publish.ok"
        );

        // RECORD
        let event = AlertEvent {
            event_id,
            timestamp,
            address,
            coordinates,
            user_message,
            notification_id: notification_id
                .clone()
                .unwrap_or_else(|| NOTIFICATION_ID_NONE.to_owned()),
        };
        if let Err(source) = self.recorder.put(&event).await {
            // The notification is out; there is no compensating action.
            tracing::error!(
                error = %source,
                notification_id = %event.notification_id,
                "dispatch.record.failed"
            );
            return Err(DispatchError::Record { event_id, notification_id, source });
        }
        tracing::info!("dispatch.record.ok");

        Ok(DispatchReceipt { event, notification_id })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
