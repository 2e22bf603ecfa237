use clap::{Parser, Subcommand};
use inquire::autocompletion::Replacement;

use meteo_core::{
    Config, ProviderId, SuggestEngine, WeatherService,
    suggest::{self, SUGGESTION_CAP, cities::RUSSIAN_CITIES},
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather lookup with city-name resolution")]
pub struct Cli {
    /// Verbose diagnostics (resolution fallbacks, request tracing).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: String,
    },

    /// Show current weather for a city.
    Show {
        /// City name, Cyrillic or Latin.
        city: String,

        /// ISO country code sent with the query.
        #[arg(long, default_value = "ru")]
        country: String,

        /// Provider short name; defaults to the configured default provider.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Pick a city interactively, with suggestions, then show its weather.
    Search {
        /// ISO country code sent with the query.
        #[arg(long, default_value = "ru")]
        country: String,

        /// Provider short name; defaults to the configured default provider.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Print the ranked city suggestions for a partial query.
    Suggest {
        /// Partial city name, e.g. "Мос".
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { city, country, provider } => {
                show(&city, &country, provider.as_deref()).await
            }
            Command::Search { country, provider } => search(&country, provider.as_deref()).await,
            Command::Suggest { query } => suggest_matches(&query).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = inquire::Password::new(&format!("API key for {}:", id.display_name()))
        .without_confirmation()
        .prompt()?;

    config.upsert_provider_api_key(id, api_key);
    config.save()?;

    println!("Saved credentials for {}.", id.display_name());
    if let Ok(default) = config.default_provider_id() {
        println!("Default provider: {default}");
    }

    Ok(())
}

async fn show(city: &str, country: &str, provider: Option<&str>) -> anyhow::Result<()> {
    let provider_id = provider.map(ProviderId::try_from).transpose()?;
    let service = WeatherService::new(Config::load()?);

    let weather = service.lookup(city, country, provider_id).await?;
    println!("{}", output::format_report(&weather));

    Ok(())
}

/// Suggestion ranking behind inquire's prompt: the highlighted entry wins,
/// otherwise tab-completion takes the top-ranked match.
#[derive(Clone)]
struct CityCompleter;

impl inquire::Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        Ok(suggest::rank_matches(RUSSIAN_CITIES, input, SUGGESTION_CAP)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion.or_else(|| {
            suggest::rank_matches(RUSSIAN_CITIES, input, 1).first().map(|s| s.to_string())
        }))
    }
}

async fn search(country: &str, provider: Option<&str>) -> anyhow::Result<()> {
    let provider_id = provider.map(ProviderId::try_from).transpose()?;
    let service = WeatherService::new(Config::load()?);

    let city = inquire::Text::new("City:")
        .with_autocomplete(CityCompleter)
        .with_placeholder("Москва")
        .with_help_message("type to see suggestions, ↑↓ to navigate, Enter to select")
        .prompt()?;

    let weather = service.lookup(&city, country, provider_id).await?;
    println!("{}", output::format_report(&weather));

    Ok(())
}

async fn suggest_matches(query: &str) -> anyhow::Result<()> {
    let engine = SuggestEngine::new();
    engine.request_matches(query).await;

    let state = engine.state().await;
    if !state.show_suggestions() {
        println!("No matching cities.");
        return Ok(());
    }

    for (i, city) in state.suggestions.iter().enumerate() {
        println!("{:>2}. {city}", i + 1);
    }

    Ok(())
}
