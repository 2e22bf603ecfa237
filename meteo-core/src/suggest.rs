//! City-name suggestions with keyboard-driven selection state.
//!
//! Two layers:
//! - pure matching and a pure selection state machine ([`rank_matches`],
//!   [`SessionState`]), directly unit-testable;
//! - [`SuggestEngine`], the asynchronous wrapper that adds the short matching
//!   delay and guarantees that only the latest request publishes its result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

pub mod cities;

/// Maximum number of suggestions shown at once.
pub const SUGGESTION_CAP: usize = 8;

/// Artificial latency of one matching cycle.
pub const MATCH_DELAY: Duration = Duration::from_millis(150);

/// Rank vocabulary entries against a query.
///
/// Entries whose lowercased form starts with the lowercased query come first,
/// then entries that merely contain it, each tier in vocabulary order; the
/// concatenation is cut to `cap`. There is no secondary scoring.
pub fn rank_matches<'a>(vocab: &[&'a str], query: &str, cap: usize) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut prefix = Vec::new();
    let mut partial = Vec::new();

    for entry in vocab {
        let lower = entry.to_lowercase();
        if lower.starts_with(&needle) {
            prefix.push(*entry);
        } else if lower.contains(&needle) {
            partial.push(*entry);
        }
    }

    prefix.extend(partial);
    prefix.truncate(cap);
    prefix
}

/// Per-input-session suggestion state.
///
/// `selected: None` means no suggestion is highlighted. Whenever
/// `suggestions` is replaced, `selected` resets, so an index is either `None`
/// or in bounds of the current list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub suggestions: Vec<String>,
    pub selected: Option<usize>,
    pub is_loading: bool,
    pub last_query: Option<String>,
}

/// Input events driving the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestEvent {
    MoveDown,
    MoveUp,
    Enter,
    Escape,
    BlurOutside,
    Click(usize),
}

/// What the caller should do after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// State may have changed; nothing to act on.
    None,
    /// A suggestion was committed as the input value.
    Commit(String),
    /// Run the primary search with the text the user typed.
    RunSearch,
}

impl SessionState {
    pub fn show_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Reset to the initial state.
    pub fn clear(&mut self) {
        *self = SessionState::default();
    }

    /// Apply one event. Navigation wraps around; Enter without a highlighted
    /// suggestion means "search the typed text", not a commit.
    pub fn handle(&mut self, event: SuggestEvent) -> EventOutcome {
        let len = self.suggestions.len();

        if len == 0 {
            // Panel closed: only Enter means anything (run the search).
            return match event {
                SuggestEvent::Enter => EventOutcome::RunSearch,
                _ => EventOutcome::None,
            };
        }

        match event {
            SuggestEvent::MoveDown => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1) % len));
                EventOutcome::None
            }
            SuggestEvent::MoveUp => {
                self.selected = Some(self.selected.map_or(len - 1, |i| (i + len - 1) % len));
                EventOutcome::None
            }
            SuggestEvent::Enter => match self.selected {
                Some(i) => {
                    let city = self.suggestions[i].clone();
                    self.clear();
                    EventOutcome::Commit(city)
                }
                None => {
                    self.clear();
                    EventOutcome::RunSearch
                }
            },
            SuggestEvent::Escape | SuggestEvent::BlurOutside => {
                self.clear();
                EventOutcome::None
            }
            SuggestEvent::Click(i) => match self.suggestions.get(i) {
                Some(city) => {
                    let city = city.clone();
                    self.clear();
                    EventOutcome::Commit(city)
                }
                None => EventOutcome::None,
            },
        }
    }
}

/// Asynchronous suggestion engine over a fixed vocabulary.
///
/// A matching cycle waits [`MATCH_DELAY`], then publishes its ranked result
/// only if no newer request (or clear) arrived in the meantime, so rapid
/// typing cannot apply results out of order.
#[derive(Debug)]
pub struct SuggestEngine {
    vocab: &'static [&'static str],
    state: Mutex<SessionState>,
    generation: AtomicU64,
    delay: Duration,
}

impl Default for SuggestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestEngine {
    pub fn new() -> Self {
        Self::with_vocabulary(cities::RUSSIAN_CITIES, MATCH_DELAY)
    }

    pub fn with_vocabulary(vocab: &'static [&'static str], delay: Duration) -> Self {
        Self {
            vocab,
            state: Mutex::new(SessionState::default()),
            generation: AtomicU64::new(0),
            delay,
        }
    }

    /// Snapshot of the current session state.
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Apply a selection event to the session state.
    pub async fn handle_event(&self, event: SuggestEvent) -> EventOutcome {
        let mut state = self.state.lock().await;
        let was_open = state.show_suggestions();
        let outcome = state.handle(event);
        if was_open && !state.show_suggestions() {
            // The panel just closed; a still-pending matching cycle must not
            // reopen it.
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        outcome
    }

    /// Request suggestions for `query`.
    ///
    /// An empty (after trimming) query clears everything immediately. A query
    /// equal to the last one is a no-op, so refocusing the input does not
    /// re-run the cycle. Anything else records the query, waits the matching
    /// delay and publishes the ranked result if still the latest request.
    pub async fn request_matches(&self, query: &str) {
        if query.trim().is_empty() {
            let mut state = self.state.lock().await;
            state.clear();
            self.generation.fetch_add(1, Ordering::SeqCst);
            return;
        }

        let my_generation = {
            let mut state = self.state.lock().await;
            if state.last_query.as_deref() == Some(query) {
                return;
            }
            state.last_query = Some(query.to_string());
            state.is_loading = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        tokio::time::sleep(self.delay).await;

        let ranked: Vec<String> = rank_matches(self.vocab, query, SUGGESTION_CAP)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            // Superseded while we were waiting; the newer cycle owns the state.
            return;
        }
        state.suggestions = ranked;
        state.selected = None;
        state.is_loading = false;
    }
}
