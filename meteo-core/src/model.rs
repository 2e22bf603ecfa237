use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query for a single current-conditions lookup.
///
/// `city` is the resolved, API-safe name (see [`crate::resolve`]); `country`
/// is an ISO country code string passed through to the provider.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub provider: String,
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Meteorological wind direction, degrees clockwise from north.
    pub wind_deg: f64,
    /// Provider-specific icon code; turning it into a URL is up to the caller.
    pub icon: String,
    pub observation_time: DateTime<Utc>,
}
