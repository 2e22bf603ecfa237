//! One-shot weather lookup: validate input, resolve the city name, pick a
//! provider and fetch current conditions.

use crate::{
    Config, WeatherRequest, WeatherResponse,
    provider::{self, FetchError, ProviderId},
    resolve::{GoogleTranslator, Resolver, ResolverConfig},
};

/// Why a lookup produced no weather data.
///
/// Name-resolution problems never show up here: they degrade to
/// transliteration inside the resolver. What remains is invalid input,
/// configuration gaps, and the weather request itself failing.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Enter a city name")]
    EmptyCity,

    #[error(transparent)]
    Provider(#[from] anyhow::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Application-level service wiring configuration, resolver and providers
/// together. Built once at startup by the composition root.
#[derive(Debug)]
pub struct WeatherService {
    config: Config,
    resolver: Resolver,
}

impl WeatherService {
    pub fn new(config: Config) -> Self {
        let resolver = Resolver::new(
            ResolverConfig::from(&config.resolver),
            Box::new(GoogleTranslator::new()),
        );
        Self { config, resolver }
    }

    /// Same service with a caller-supplied resolver (tests, alternative
    /// translation backends).
    pub fn with_resolver(config: Config, resolver: Resolver) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch current weather for a user-typed city name.
    ///
    /// `provider_id` of `None` uses the configured default provider.
    pub async fn lookup(
        &self,
        city: &str,
        country: &str,
        provider_id: Option<ProviderId>,
    ) -> Result<WeatherResponse, LookupError> {
        if city.trim().is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let resolved = self.resolver.resolve_city_name(city).await;
        if resolved != city {
            tracing::debug!(from = city, to = %resolved, "resolved city name for provider query");
        }

        let provider = match provider_id {
            Some(id) => provider::provider_from_config(id, &self.config)?,
            None => provider::default_provider_from_config(&self.config)?,
        };

        let request = WeatherRequest { city: resolved, country: country.to_string() };
        tracing::info!(city = %request.city, country = %request.country, "requesting current weather");

        Ok(provider.current_weather(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::WeatherProvider;
    use crate::resolve::{Translate, TranslationError, TranslationErrorKind};
    use crate::suggest::{EventOutcome, SuggestEngine, SuggestEvent};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug)]
    struct UnavailableTranslator;

    #[async_trait]
    impl Translate for UnavailableTranslator {
        async fn translate(
            &self,
            _text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, TranslationError> {
            Err(TranslationError::new(
                TranslationErrorKind::AccessDenied,
                "Translation service refused access",
            ))
        }
    }

    fn offline_service(config: Config) -> WeatherService {
        let resolver = Resolver::new(ResolverConfig::default(), Box::new(UnavailableTranslator));
        WeatherService::with_resolver(config, resolver)
    }

    #[tokio::test]
    async fn empty_city_is_rejected_inline() {
        let service = offline_service(Config::default());

        let err = service.lookup("   ", "ru", None).await.unwrap_err();
        assert!(matches!(err, LookupError::EmptyCity));
    }

    #[tokio::test]
    async fn missing_default_provider_surfaces_configure_hint() {
        let service = offline_service(Config::default());

        let err = service.lookup("Москва", "ru", None).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
    }

    #[tokio::test]
    async fn missing_api_key_surfaces_configure_hint() {
        let service = offline_service(Config::default());

        let err = service
            .lookup("Москва", "ru", Some(ProviderId::OpenWeather))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    /// Records the request it was asked for and answers with canned weather.
    #[derive(Debug, Default)]
    struct RecordingProvider {
        seen: Mutex<Option<WeatherRequest>>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current_weather(
            &self,
            request: &WeatherRequest,
        ) -> Result<WeatherResponse, FetchError> {
            *self.seen.lock().expect("test mutex") = Some(request.clone());

            Ok(WeatherResponse {
                provider: "openweather".to_string(),
                location_name: request.city.clone(),
                temperature_c: 0.0,
                feels_like_c: 0.0,
                condition: "clear".to_string(),
                humidity_pct: 50,
                wind_speed_mps: 1.0,
                wind_deg: 0.0,
                icon: String::new(),
                observation_time: Utc::now(),
            })
        }
    }

    const PIPELINE_VOCAB: &[&str] = &["Замоскворечье", "Москва", "Мостовской"];

    // Typed "Мос" → keyboard selection → resolver fallback → provider sees
    // the Latin query.
    #[tokio::test(start_paused = true)]
    async fn typed_cyrillic_input_reaches_the_provider_as_latin() {
        let engine = SuggestEngine::with_vocabulary(PIPELINE_VOCAB, Duration::from_millis(150));

        engine.request_matches("Мос").await;
        let state = engine.state().await;
        assert_eq!(
            state.suggestions,
            vec!["Москва", "Мостовской", "Замоскворечье"],
            "prefix matches must rank ahead of substring matches"
        );

        engine.handle_event(SuggestEvent::MoveDown).await;
        let outcome = engine.handle_event(SuggestEvent::Enter).await;
        let EventOutcome::Commit(city) = outcome else {
            panic!("Enter with a highlighted suggestion must commit, got {outcome:?}");
        };
        assert_eq!(city, "Москва");

        // Translation is down, so the resolver degrades to transliteration.
        let resolver = Resolver::new(ResolverConfig::default(), Box::new(UnavailableTranslator));
        let resolved = resolver.resolve_city_name(&city).await;
        assert_eq!(resolved, "Moskva");

        let provider = RecordingProvider::default();
        let request = WeatherRequest { city: resolved, country: "ru".to_string() };
        provider.current_weather(&request).await.expect("canned response");

        let seen = provider.seen.lock().expect("test mutex").clone().expect("request recorded");
        assert_eq!(seen.city, "Moskva");
        assert_eq!(seen.country, "ru");
    }
}
