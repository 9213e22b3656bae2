// Rust guideline compliant 2026-10-16

//! Route handlers. Each one validates the body, calls one port (or the
//! dispatcher), and reshapes the result.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use dispatcher::require_coordinates;
use domain::{
    ADDRESS_NOT_FOUND, Geocoder, HOSPITAL_CATEGORY, HOSPITAL_SEARCH_RADIUS_M, Place, PlaceSearch,
    Publisher, RankedPlace, Recorder, rank_by_distance,
};

use super::error::{ApiError, HOSPITALS_FAILED, LOCATION_FAILED};
use super::types::{
    AlertBody, AppState, HealthResponse, LocationBody, LocationResponse, SendResponse,
};

type Body<T> = Result<Json<T>, JsonRejection>;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /api/location`: reverse-geocode the caller's position.
pub async fn location<G, S, P, R>(
    State(state): State<AppState<G, S, P, R>>,
    body: Body<LocationBody>,
) -> Result<Json<LocationResponse>, ApiError>
where
    G: Geocoder + Sync,
    P: Publisher + Sync,
    R: Recorder + Sync,
{
    let Json(body) = body?;
    let coordinates = require_coordinates(body.latitude, body.longitude)?;
    let user_address = state
        .dispatcher
        .geocoder()
        .geocode(&coordinates)
        .await
        .map_err(|e| ApiError::upstream(LOCATION_FAILED, e))?
        .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_owned());
    Ok(Json(LocationResponse { coordinates, user_address }))
}

async fn search_hospitals<G, S, P, R>(
    state: &AppState<G, S, P, R>,
    body: Body<LocationBody>,
) -> Result<(domain::Coordinates, Vec<Place>), ApiError>
where
    S: PlaceSearch + Sync,
{
    let Json(body) = body?;
    let coordinates = require_coordinates(body.latitude, body.longitude)?;
    let places = state
        .places
        .search_nearby(&coordinates, HOSPITAL_SEARCH_RADIUS_M, HOSPITAL_CATEGORY)
        .await
        .map_err(|e| ApiError::upstream(HOSPITALS_FAILED, e))?;
    Ok((coordinates, places))
}

/// `POST /api/hospitals`: upstream hospital entries, unmodified.
pub async fn hospitals<G, S, P, R>(
    State(state): State<AppState<G, S, P, R>>,
    body: Body<LocationBody>,
) -> Result<Json<Vec<serde_json::Value>>, ApiError>
where
    S: PlaceSearch + Sync,
{
    let (_, places) = search_hospitals(&state, body).await?;
    Ok(Json(places.into_iter().map(|p| p.raw).collect()))
}

/// `POST /api/hospitals/nearest`: hospitals with distances, nearest first.
pub async fn nearest_hospitals<G, S, P, R>(
    State(state): State<AppState<G, S, P, R>>,
    body: Body<LocationBody>,
) -> Result<Json<Vec<RankedPlace>>, ApiError>
where
    S: PlaceSearch + Sync,
{
    let (origin, places) = search_hospitals(&state, body).await?;
    Ok(Json(rank_by_distance(&origin, &places)))
}

/// `POST /api/sendsms`: run the full dispatch pipeline.
pub async fn send_sms<G, S, P, R>(
    State(state): State<AppState<G, S, P, R>>,
    body: Body<AlertBody>,
) -> Result<Json<SendResponse>, ApiError>
where
    G: Geocoder + Sync,
    P: Publisher + Sync,
    R: Recorder + Sync,
{
    let Json(body) = body?;
    let receipt = state.dispatcher.dispatch(body.into()).await?;
    Ok(Json(SendResponse { success: true, message_id: receipt.notification_id }))
}
