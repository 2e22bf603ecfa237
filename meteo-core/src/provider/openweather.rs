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
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            api_key,
            http: http_client(timeout),
        }
    }

    fn query_location(request: &WeatherRequest) -> String {
        if request.country.trim().is_empty() {
            request.city.clone()
        } else {
            format!("{},{}", request.city, request.country)
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherResponse, FetchError> {
        let url = "https://api.openweathermap.org/data/2.5/weather";
        let location = Self::query_location(request);

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let observation_time = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

        let (condition, icon) = parsed
            .weather
            .first()
            .map(|w| (w.description.clone(), w.icon.clone()))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        Ok(WeatherResponse {
            provider: "openweather".to_string(),
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            condition,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            wind_deg: parsed.wind.deg,
            icon,
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
            "name": "Moscow",
            "dt": 1700000000,
            "main": {"temp": -3.2, "feels_like": -8.1, "humidity": 84},
            "weather": [{"description": "light snow", "icon": "13d"}],
            "wind": {"speed": 4.5, "deg": 250}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("must parse");
        assert_eq!(parsed.name, "Moscow");
        assert_eq!(parsed.main.humidity, 84);
        assert_eq!(parsed.weather[0].icon, "13d");
        assert_eq!(parsed.wind.deg, 250.0);
    }

    #[test]
    fn missing_wind_deg_defaults_to_zero() {
        let body = r#"{
            "name": "Omsk",
            "dt": 1700000000,
            "main": {"temp": 1.0, "feels_like": 0.0, "humidity": 70},
            "weather": [],
            "wind": {"speed": 2.0}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("must parse");
        assert_eq!(parsed.wind.deg, 0.0);
    }

    #[test]
    fn location_query_appends_country_when_present() {
        let with_country = WeatherRequest {
            city: "Moskva".to_string(),
            country: "ru".to_string(),
        };
        assert_eq!(OpenWeatherProvider::query_location(&with_country), "Moskva,ru");

        let without = WeatherRequest {
            city: "Moskva".to_string(),
            country: "  ".to_string(),
        };
        assert_eq!(OpenWeatherProvider::query_location(&without), "Moskva");
    }
}
