// Rust guideline compliant 2026-10-16

//! Process configuration read from the environment (and an optional `.env`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context as _, bail};
use chrono::FixedOffset;

/// Everything the binary needs to wire adapters and start listening.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address (`BIND_ADDR`).
    pub bind_addr: IpAddr,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Key for the Google geocoding and nearby-search calls.
    pub google_api_key: String,
    /// Google Maps web-service base, without trailing path.
    pub google_maps_base_url: String,
    /// ntfy server base.
    pub ntfy_base_url: String,
    /// Topic every alert is published to.
    pub ntfy_topic: String,
    /// Bearer credential for the publisher; `None` for open topics.
    pub ntfy_token: Option<String>,
    /// sqlx connection string of the alert log.
    pub database_url: String,
    /// Offset the alert timestamp is rendered in.
    pub alert_utc_offset: FixedOffset,
    /// Timeout applied to every upstream HTTP call.
    pub http_timeout: Duration,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is missing or a value does not parse.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Fails when `GOOGLE_API_KEY` or `NTFY_TOPIC` is missing, or when `PORT`,
    /// `BIND_ADDR`, `ALERT_UTC_OFFSET`, or `HTTP_TIMEOUT_SECS` does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().with_context(|| format!("PORT is not a port number: {raw}"))?,
            None => 3001,
        };
        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.parse::<IpAddr>().with_context(|| format!("BIND_ADDR is not an IP address: {raw}"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let alert_utc_offset = parse_utc_offset(&get("ALERT_UTC_OFFSET").unwrap_or_else(|| "-05:00".to_owned()))?;
        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>().with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            ),
            None => Duration::from_secs(10),
        };

        Ok(Self {
            bind_addr,
            port,
            google_api_key: require("GOOGLE_API_KEY")?,
            google_maps_base_url: get("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|| "https://maps.googleapis.com".to_owned()),
            ntfy_base_url: get("NTFY_BASE_URL").unwrap_or_else(|| "https://ntfy.sh".to_owned()),
            ntfy_topic: require("NTFY_TOPIC")?,
            ntfy_token: get("NTFY_TOKEN"),
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite:geosos.db".to_owned()),
            alert_utc_offset,
            http_timeout,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
        })
    }

    /// Socket the HTTP server binds to.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Parse `+HH:MM` / `-HH:MM` (or `Z`) into a fixed offset.
fn parse_utc_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).context("zero offset");
    }
    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => bail!("ALERT_UTC_OFFSET must look like +HH:MM or -HH:MM: {raw}"),
    };
    let Some((hours, minutes)) = rest.split_once(':') else {
        bail!("ALERT_UTC_OFFSET must look like +HH:MM or -HH:MM: {raw}");
    };
    let hours: i32 = hours.parse().with_context(|| format!("bad hours in ALERT_UTC_OFFSET: {raw}"))?;
    let minutes: i32 =
        minutes.parse().with_context(|| format!("bad minutes in ALERT_UTC_OFFSET: {raw}"))?;
    if !(0..60).contains(&minutes) {
        bail!("minutes out of range in ALERT_UTC_OFFSET: {raw}");
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("ALERT_UTC_OFFSET out of range: {raw}"))
}
