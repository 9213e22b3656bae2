// Rust guideline compliant 2026-10-16

//! Great-circle distance and proximity ranking for nearby places.

use serde::ser::{Serialize, SerializeMap as _, Serializer};

use crate::{Coordinates, Place};

/// Mean Earth radius used by the Haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A place enriched with its distance from a query origin.
///
/// Serializes as the upstream entry with `name`, `vicinity`, `location` and
/// `distanceKm` set on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlace {
    /// Display name.
    pub name: String,
    /// Short address.
    pub vicinity: String,
    /// Location of the place.
    pub location: Coordinates,
    /// Haversine distance from the origin, in kilometers.
    pub distance_km: f64,
    /// Upstream entry this place was parsed from.
    pub raw: serde_json::Value,
}

const RANKED_KEYS: [&str; 4] = ["name", "vicinity", "location", "distanceKm"];

impl Serialize for RankedPlace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(upstream) = self.raw.as_object() {
            for (key, value) in upstream.iter().filter(|(k, _)| !RANKED_KEYS.contains(&k.as_str())) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("vicinity", &self.vicinity)?;
        map.serialize_entry("location", &self.location)?;
        map.serialize_entry("distanceKm", &self.distance_km)?;
        map.end()
    }
}

/// Haversine great-circle distance between `a` and `b`, in kilometers.
#[must_use]
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude().to_radians().cos()
            * b.latitude().to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Attach a distance from `origin` to every place and sort nearest first.
///
/// Places without a location are left out. Ties keep their upstream order.
#[must_use]
pub fn rank_by_distance(origin: &Coordinates, places: &[Place]) -> Vec<RankedPlace> {
    let mut ranked: Vec<RankedPlace> = places
        .iter()
        .filter_map(|place| {
            let location = place.location?;
            Some(RankedPlace {
                name: place.name.clone(),
                vicinity: place.vicinity.clone(),
                location,
                distance_km: haversine_km(origin, &location),
                raw: place.raw.clone(),
            })
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
