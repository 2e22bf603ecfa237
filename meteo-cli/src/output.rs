//! Human-friendly rendering of weather responses.

use chrono::Local;
use meteo_core::{ProviderId, WeatherResponse};

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Compass sector for a wind direction in degrees.
pub fn wind_direction(degrees: f64) -> &'static str {
    let sector = (degrees / 45.0).round() as usize % 8;
    WIND_DIRECTIONS[sector]
}

/// Display name for a provider id string; unknown ids pass through as-is.
pub fn provider_display_name(provider: &str) -> &str {
    ProviderId::try_from(provider).map(|id| id.display_name()).unwrap_or(provider)
}

pub fn format_report(weather: &WeatherResponse) -> String {
    let observed = weather.observation_time.with_timezone(&Local).format("%H:%M");

    format!(
        "{location} ({provider})\n\
         {condition}, {temp:.1}°C (feels like {feels:.1}°C)\n\
         Humidity {humidity}%, wind {speed:.1} m/s {direction}\n\
         Observed at {observed}",
        location = weather.location_name,
        provider = provider_display_name(&weather.provider),
        condition = weather.condition,
        temp = weather.temperature_c,
        feels = weather.feels_like_c,
        humidity = weather.humidity_pct,
        speed = weather.wind_speed_mps,
        direction = wind_direction(weather.wind_deg),
    )
}
