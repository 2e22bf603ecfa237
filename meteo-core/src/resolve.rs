//! City-name resolution: turning free-text (typically Cyrillic) input into
//! the string sent to a weather provider.
//!
//! Resolution is best-effort translation with a deterministic fallback:
//! already-Latin names pass through untouched, everything else goes to the
//! translation service, and when that fails the caller-facing entry point
//! degrades to [`translit::transliterate`] instead of surfacing an error.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{fmt::Debug, time::Duration};

use crate::config::ResolverSettings;

pub mod translit;

/// Pause between consecutive network calls of a batch resolution, to stay
/// under the translation service's rate limit.
const BATCH_PAUSE: Duration = Duration::from_millis(100);

/// Closed classification of translation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationErrorKind {
    Timeout,
    RateLimited,
    AccessDenied,
    Unknown,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TranslationError {
    pub kind: TranslationErrorKind,
    pub message: String,
}

impl TranslationError {
    pub fn new(kind: TranslationErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    fn timed_out() -> Self {
        Self::new(TranslationErrorKind::Timeout, "Translation timed out")
    }
}

/// Classify an HTTP status from the translation service.
fn classify_status(status: StatusCode) -> TranslationError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TranslationError::new(
            TranslationErrorKind::RateLimited,
            "Translation quota exceeded",
        ),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TranslationError::new(
            TranslationErrorKind::AccessDenied,
            "Translation service refused access",
        ),
        other => TranslationError::new(
            TranslationErrorKind::Unknown,
            format!("Translation service returned HTTP {other}"),
        ),
    }
}

/// Classify a transport-level error from the translation service.
fn classify_transport(err: &reqwest::Error) -> TranslationError {
    if err.is_timeout() {
        TranslationError::timed_out()
    } else {
        TranslationError::new(
            TranslationErrorKind::Unknown,
            format!("Failed to reach the translation service: {err}"),
        )
    }
}

/// External translation capability.
#[async_trait]
pub trait Translate: Send + Sync + Debug {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// Translation over the public Google endpoint (the same one the usual
/// in-browser clients wrap). No API key; rate limits apply, hence the
/// fallback path.
#[derive(Debug, Clone, Default)]
pub struct GoogleTranslator {
    http: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Translate for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let url = "https://translate.googleapis.com/translate_a/single";

        let res = self
            .http
            .get(url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        // Body shape: [[["Moscow","Москва",...],...],...]; the first array
        // holds translated segments, each with the translated text first.
        let value: serde_json::Value = res.json().await.map_err(|e| {
            TranslationError::new(
                TranslationErrorKind::Unknown,
                format!("Failed to parse translation response: {e}"),
            )
        })?;

        let translated: String = value
            .get(0)
            .and_then(serde_json::Value::as_array)
            .map(|segments| {
                segments
                    .iter()
                    .filter_map(|s| s.get(0).and_then(serde_json::Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(TranslationError::new(
                TranslationErrorKind::Unknown,
                "Translation service returned an empty result",
            ));
        }

        Ok(translated)
    }
}

/// Resolver configuration, owned by the composition root and handed in at
/// construction. [`ResolverConfig::default`] is the ad-hoc path with the
/// stock language pair and timeout.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub source_lang: String,
    pub target_lang: String,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from(&ResolverSettings::default())
    }
}

impl From<&ResolverSettings> for ResolverConfig {
    fn from(settings: &ResolverSettings) -> Self {
        Self {
            source_lang: settings.source_lang.clone(),
            target_lang: settings.target_lang.clone(),
            timeout: settings.timeout(),
        }
    }
}

/// A successful resolution. Failure is a [`TranslationError`], so a result is
/// never half-populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: String,
    pub original: String,
}

#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
    translator: Box<dyn Translate>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, translator: Box<dyn Translate>) -> Self {
        Self { config, translator }
    }

    /// One-off resolver with default configuration and the stock translator.
    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default(), Box::new(GoogleTranslator::new()))
    }

    /// Resolve a city name to its target-language form.
    ///
    /// Already-Latin names (letters, spaces and common name punctuation only)
    /// come back unchanged without touching the network. The translation call
    /// runs under the configured timeout, independent from any weather-fetch
    /// timeout.
    pub async fn resolve(&self, city: &str) -> Result<Resolution, TranslationError> {
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return Err(TranslationError::new(
                TranslationErrorKind::Unknown,
                "Nothing to translate: city name is empty",
            ));
        }

        if is_latin_place_name(trimmed) {
            return Ok(Resolution {
                resolved: trimmed.to_string(),
                original: city.to_string(),
            });
        }

        let translated = tokio::time::timeout(
            self.config.timeout,
            self.translator.translate(trimmed, &self.config.source_lang, &self.config.target_lang),
        )
        .await
        .map_err(|_| TranslationError::timed_out())??;

        Ok(Resolution { resolved: translated, original: city.to_string() })
    }

    /// Resolve several names strictly in order, pausing between elements so
    /// the translation service is not hammered. Each element fails or
    /// succeeds on its own; the batch never aborts early.
    pub async fn resolve_batch(
        &self,
        names: &[String],
    ) -> Vec<Result<Resolution, TranslationError>> {
        let mut results = Vec::with_capacity(names.len());

        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
            results.push(self.resolve(name).await);
        }

        results
    }

    /// Resolve a city name for a provider query. Never fails: any resolution
    /// error degrades to deterministic transliteration, with a warning for
    /// diagnostics.
    pub async fn resolve_city_name(&self, city: &str) -> String {
        match self.resolve(city).await {
            Ok(resolution) => resolution.resolved,
            Err(err) => {
                tracing::warn!(
                    city,
                    error = %err,
                    "translation failed, falling back to transliteration"
                );
                translit::transliterate(city)
            }
        }
    }
}

/// True when the whole string is ASCII letters, whitespace and the
/// punctuation that shows up in Latin place names. Such input is treated as
/// already being in the target language.
fn is_latin_place_name(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            c.is_ascii_alphabetic()
                || c.is_ascii_whitespace()
                || matches!(c, '-' | ',' | '.' | '\'' | '"')
        })
}
