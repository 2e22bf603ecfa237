use crate::{
    Config, WeatherRequest, WeatherResponse,
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod openweather;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    /// Human-facing provider name for output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OpenWeather",
            ProviderId::WeatherApi => "WeatherAPI",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, weatherapi."
            )),
        }
    }
}

/// Failure of a single weather request, split by cause so callers can
/// surface timeouts, transport problems and server-reported errors
/// differently.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Weather request timed out waiting for the server")]
    Timeout,

    #[error("Failed to reach the weather service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Failed to parse weather service response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}

/// Pull a server-reported message out of a non-2xx body.
///
/// OpenWeather puts it at the top level (`{"cod":"404","message":"..."}`),
/// WeatherAPI nests it (`{"error":{"code":...,"message":"..."}}`). Missing or
/// malformed bodies fall back to a generic HTTP-status message.
pub(crate) fn server_error(status: StatusCode, body: &str) -> FetchError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let msg = v.get("message").or_else(|| v.pointer("/error/message"))?;
            let msg = msg.as_str()?.trim();
            (!msg.is_empty()).then(|| msg.to_string())
        })
        .unwrap_or_else(|| format!("Weather service returned HTTP {status}"));

    FetchError::Http { status, message }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, request: &WeatherRequest)
    -> Result<WeatherResponse, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `meteo configure {id}` and enter your API key."
        )
    })?;

    let timeout = config.request_timeout();
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => Box::new(OpenWeatherProvider::new(api_key.to_owned(), timeout)),
        ProviderId::WeatherApi => Box::new(WeatherApiProvider::new(api_key.to_owned(), timeout)),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

/// Shared reqwest client construction: every provider request carries the
/// configured abort timeout.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    // Fails only when the TLS backend cannot be initialized, which is the
    // same panic `Client::new()` would produce.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to initialize HTTP client")
}
