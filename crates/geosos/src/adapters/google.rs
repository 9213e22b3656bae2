// Rust guideline compliant 2026-10-16

//! Shared plumbing for the Google Maps web-service adapters.
//!
//! Both the geocoding and nearby-search endpoints answer HTTP 200 with a
//! `status` field. Anything but `OK` or `ZERO_RESULTS` is logged by the
//! adapters; the (empty) result list is still used as-is.

use domain::Coordinates;

/// Connection settings shared by [`GoogleGeocoder`](super::google_geocoder::GoogleGeocoder)
/// and [`GooglePlaces`](super::google_places::GooglePlaces).
#[derive(Debug, Clone)]
pub struct GoogleApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleApi {
    /// Create settings for `base_url` (normally `https://maps.googleapis.com`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Start a GET to `path` with the API key attached.
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .query(&[("key", self.api_key.as_str())])
    }
}

/// `lat,lng` as the Google endpoints expect it.
pub(crate) fn lat_lng(coordinates: &Coordinates) -> String {
    format!("{},{}", coordinates.latitude(), coordinates.longitude())
}

/// Describe a non-success `status` field, or `None` when the call succeeded.
pub(crate) fn status_failure(status: Option<&str>, error_message: Option<&str>) -> Option<String> {
    match status {
        None | Some("OK" | "ZERO_RESULTS") => None,
        Some(status) => Some(match error_message {
            Some(message) => format!("{status}: {message}"),
            None => status.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_and_zero_results_are_success() {
        assert_eq!(status_failure(Some("OK"), None), None);
        assert_eq!(status_failure(Some("ZERO_RESULTS"), Some("ignored")), None);
        assert_eq!(status_failure(None, None), None);
    }

    #[test]
    fn other_statuses_are_failures() {
        assert_eq!(
            status_failure(Some("REQUEST_DENIED"), Some("The provided API key is invalid.")),
            Some("REQUEST_DENIED: The provided API key is invalid.".to_owned())
        );
        assert_eq!(status_failure(Some("OVER_QUERY_LIMIT"), None), Some("OVER_QUERY_LIMIT".to_owned()));
    }

    #[test]
    fn lat_lng_uses_shortest_decimal() {
        let c = Coordinates::new(40.7128, -74.0060).unwrap();
        assert_eq!(lat_lng(&c), "40.7128,-74.006");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = GoogleApi::new(reqwest::Client::new(), "http://example.test/", "k");
        let req = api.get("/maps/api/geocode/json").build().unwrap();
        assert_eq!(req.url().as_str(), "http://example.test/maps/api/geocode/json?key=k");
    }
}
