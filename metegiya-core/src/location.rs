//! Position resolution with a two-outcome contract.
//!
//! A [`LocationProvider`] call produces exactly one of [`Position`] or
//! [`LocationFailure`] and is never retried internally. Failure reasons are
//! kept distinct for logging and diagnostics even though the user-facing
//! notice collapses them (see [`crate::dispatch::failure_notice`]).
//!
//! Providers:
//! - [`IpLocationProvider`]: coarse position from an IP-geolocation HTTP
//!   service. Good enough for an emergency alert when no GPS is available.
//! - [`FixedLocationProvider`]: a configured constant, used when the
//!   network lookup is unwanted and in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Why a position could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationFailure {
    /// The platform refused access to the position.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No location service is available at all.
    #[error("No location service available")]
    ServiceUnavailable,

    /// The lookup did not complete within the configured time.
    #[error("Location request timed out")]
    TimedOut,

    /// The lookup could not reach the service.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with something unusable.
    #[error("Malformed position response: {0}")]
    InvalidResponse(String),
}

/// Asynchronous source of the device position.
///
/// Each call is an independent request: no coalescing of concurrent calls,
/// no caching, no automatic retry.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Resolve the current position.
    async fn resolve(&self) -> Result<Position, LocationFailure>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    city: Option<String>,
}

/// Position lookup through an IP-geolocation HTTP service.
pub struct IpLocationProvider {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl IpLocationProvider {
    /// Default lookup endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://ipapi.co/json/";

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn resolve(&self) -> Result<Position, LocationFailure> {
        debug!("Resolving position via {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(
                "User-Agent",
                concat!("metegiya/", env!("CARGO_PKG_VERSION")),
            )
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationFailure::TimedOut
                } else {
                    LocationFailure::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geolocation endpoint answered {}", status);
            return Err(LocationFailure::InvalidResponse(format!("HTTP {}", status)));
        }

        let body: IpApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LocationFailure::TimedOut
            } else {
                LocationFailure::InvalidResponse(e.to_string())
            }
        })?;

        let position = Position::new(body.latitude, body.longitude);
        debug!(
            "Resolved position {},{} near {}",
            position.latitude,
            position.longitude,
            body.city.as_deref().unwrap_or("unknown city")
        );
        Ok(position)
    }
}

/// Provider returning a configured constant position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Position,
}

impl FixedLocationProvider {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn resolve(&self) -> Result<Position, LocationFailure> {
        Ok(self.position)
    }
}
