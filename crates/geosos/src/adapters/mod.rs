// Rust guideline compliant 2026-10-16

//! Adapters (secondary ports) for the GeoSOS binary.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate against one external service. Adapters know nothing about
//! the dispatch pipeline or the HTTP surface.

pub mod google;
pub mod google_geocoder;
pub mod google_places;
pub mod ntfy_publisher;
pub mod sqlite_recorder;
