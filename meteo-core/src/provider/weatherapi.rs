use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    model::{WeatherRequest, WeatherResponse},
    provider::{FetchError, http_client, server_error},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self { api_key, http: http_client(timeout) }
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    #[serde(default)]
    wind_degree: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherResponse, FetchError> {
        let url = "http://api.weatherapi.com/v1/current.json";

        // WeatherAPI geocodes `q` as free text, so the city name alone is
        // enough; no country parameter exists on this endpoint.
        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("q", request.city.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let ts = parsed.current.last_updated_epoch.or(parsed.location.localtime_epoch);
        let observation_time = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

        let location_name = format!("{}, {}", parsed.location.name, parsed.location.country);
        let wind_speed_mps = parsed.current.wind_kph / 3.6;

        Ok(WeatherResponse {
            provider: "weatherapi".to_string(),
            location_name,
            temperature_c: parsed.current.temp_c,
            feels_like_c: parsed.current.feelslike_c,
            condition: parsed.current.condition.text,
            humidity_pct: parsed.current.humidity,
            wind_speed_mps,
            wind_deg: parsed.current.wind_degree,
            icon: parsed.current.condition.icon,
            observation_time,
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_response_parses_real_payload() {
        let body = r#"{
            "location": {
                "name": "Saint Petersburg",
                "country": "Russia",
                "localtime_epoch": 1700000100
            },
            "current": {
                "temp_c": -1.0,
                "feelslike_c": -5.4,
                "humidity": 93,
                "wind_kph": 18.0,
                "wind_degree": 210,
                "condition": {"text": "Overcast", "icon": "//cdn.weatherapi.com/weather/64x64/day/122.png"},
                "last_updated_epoch": 1700000000
            }
        }"#;

        let parsed: WaResponse = serde_json::from_str(body).expect("must parse");
        assert_eq!(parsed.location.name, "Saint Petersburg");
        assert_eq!(parsed.current.humidity, 93);
        assert_eq!(parsed.current.wind_degree, 210.0);

        // kph to m/s conversion used by the provider
        let mps = parsed.current.wind_kph / 3.6;
        assert!((mps - 5.0).abs() < 1e-9);
    }

    #[test]
    fn epoch_fields_are_optional() {
        let body = r#"{
            "location": {"name": "Kazan", "country": "Russia"},
            "current": {
                "temp_c": 2.0,
                "feelslike_c": 0.0,
                "humidity": 60,
                "wind_kph": 7.2,
                "condition": {"text": "Clear"}
            }
        }"#;

        let parsed: WaResponse = serde_json::from_str(body).expect("must parse");
        assert!(parsed.location.localtime_epoch.is_none());
        assert!(parsed.current.last_updated_epoch.is_none());
        assert_eq!(parsed.current.wind_degree, 0.0);
    }
}
