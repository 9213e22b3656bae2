// Rust guideline compliant 2026-10-16

//! Alert composer -- builds the human-readable body of an SOS notification.
//!
//! Everything here is pure: no I/O, no clock reads. The caller supplies the
//! timestamp already rendered with [`format_timestamp`].

use chrono::{DateTime, FixedOffset};
use domain::Coordinates;

/// Message used when the user sent none (or only whitespace).
pub const DEFAULT_USER_MESSAGE: &str = "🚨 Emergency Alert from GeoSOS";

/// Title attached to published alerts by transports that support one.
pub const ALERT_TITLE: &str = "🚨 SOS Emergency Alert 🚨";

/// `strftime` pattern matching the `en-US` 12-hour rendering, e.g. `10/16/2026, 09:41:07 PM`.
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Return `message` unless it is absent or blank, in which case the default text.
#[must_use]
pub fn resolve_user_message(message: Option<&str>) -> &str {
    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => DEFAULT_USER_MESSAGE,
    }
}

/// Google Maps link centred on `coordinates`.
#[must_use]
pub fn maps_link(coordinates: &Coordinates) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        coordinates.latitude(),
        coordinates.longitude()
    )
}

/// Render `at` in its own offset with second precision.
#[must_use]
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Assemble the alert body.
///
/// An empty `user_message` is replaced by [`DEFAULT_USER_MESSAGE`], so
/// `compose(a, "", c, t) == compose(a, DEFAULT_USER_MESSAGE, c, t)`.
#[must_use]
pub fn compose(
    address: &str,
    user_message: &str,
    coordinates: &Coordinates,
    timestamp: &str,
) -> String {
    let user_message = resolve_user_message(Some(user_message));
    let link = maps_link(coordinates);
    format!(
        "\n{ALERT_TITLE}\n\n\
         📍 Address:\n{address}\n\n\
         📝 User Message:\n{user_message}\n\n\
         🌐 Google Maps:\n{link}\n\n\
         🕒 Timestamp:\n{timestamp}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn nyc() -> Coordinates {
        Coordinates::new(40.7128, -74.0060).unwrap()
    }

    #[test]
    fn empty_message_uses_default() {
        let ts = "01/02/2026, 03:04:05 PM";
        assert_eq!(
            compose("123 Main St", "", &nyc(), ts),
            compose("123 Main St", DEFAULT_USER_MESSAGE, &nyc(), ts)
        );
    }

    #[test]
    fn blank_message_uses_default() {
        assert_eq!(resolve_user_message(Some("   ")), DEFAULT_USER_MESSAGE);
        assert_eq!(resolve_user_message(None), DEFAULT_USER_MESSAGE);
        assert_eq!(resolve_user_message(Some("Fire")), "Fire");
    }

    #[test]
    fn body_matches_template() {
        let body = compose("123 Main St", "Fire", &nyc(), "01/02/2026, 03:04:05 PM");
        let expected = "\n🚨 SOS Emergency Alert 🚨\n\n\
                        📍 Address:\n123 Main St\n\n\
                        📝 User Message:\nFire\n\n\
                        🌐 Google Maps:\nhttps://maps.google.com/?q=40.7128,-74.006\n\n\
                        🕒 Timestamp:\n01/02/2026, 03:04:05 PM\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn compose_is_deterministic() {
        let a = compose("x", "y", &nyc(), "t");
        let b = compose("x", "y", &nyc(), "t");
        assert_eq!(a, b);
    }

    #[test]
    fn maps_link_handles_zero_and_negative() {
        let c = Coordinates::new(0.0, -0.5).unwrap();
        assert_eq!(maps_link(&c), "https://maps.google.com/?q=0,-0.5");
    }

    #[test]
    fn timestamp_is_twelve_hour_with_seconds() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = est.with_ymd_and_hms(2026, 10, 16, 21, 41, 7).unwrap();
        assert_eq!(format_timestamp(&at), "10/16/2026, 09:41:07 PM");

        let morning = est.with_ymd_and_hms(2026, 1, 5, 0, 0, 9).unwrap();
        assert_eq!(format_timestamp(&morning), "01/05/2026, 12:00:09 AM");
    }
}
