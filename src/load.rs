//! Load orchestration: the fetch lifecycle, cancellation of superseded
//! requests, and ownership of the dataset + derived palette.
//!
//! The loader is the single source of truth gating the rest of the pipeline:
//! palettes, chart configs, and legend text only exist while the state is
//! [`LoadState::Ready`]. Requests are identified by a generation counter;
//! a new load supersedes the previous one, and a superseded result (success
//! or failure) is discarded without touching state. That is a correctness
//! invariant: a slow stale response must never overwrite newer data.

use crate::api::{DataSource, LoadError};
use crate::models::Dataset;
use crate::palette::{PaletteMap, derive_palette};
use std::sync::Arc;

/// Lifecycle state of the dataset fetch.
///
/// `Ready` and `Error` are terminal for one request generation; a fresh load
/// starts a new `Loading` cycle under a new generation. A superseded request
/// causes no transition at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The dataset parsed and downstream state is derived.
    Ready,
    /// The fetch or parse failed; holds the stable user-facing message.
    Error(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Proof of which request generation a result belongs to. Returned by
/// [`Loader::begin`] and consumed by [`Loader::finish`]; a token from a
/// superseded generation makes `finish` a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

/// Owns the fetch lifecycle and everything derived from its result. All of
/// the pipeline's shared state lives here explicitly, with no module-level
/// caches.
#[derive(Debug, Default)]
pub struct Loader {
    state: LoadState,
    generation: u64,
    dataset: Option<Arc<Dataset>>,
    palette: Option<PaletteMap>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The current dataset, only while `Ready`.
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self.state {
            LoadState::Ready => self.dataset.as_ref(),
            _ => None,
        }
    }

    /// The palette derived from the current dataset, only while `Ready`.
    pub fn palette(&self) -> Option<&PaletteMap> {
        match self.state {
            LoadState::Ready => self.palette.as_ref(),
            _ => None,
        }
    }

    /// Start a new request generation and transition to `Loading`.
    ///
    /// Any in-flight request is superseded from this point on: its eventual
    /// result will be rejected by [`Loader::finish`].
    pub fn begin(&mut self) -> LoadToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        log::debug!("load generation {} started", self.generation);
        LoadToken {
            generation: self.generation,
        }
    }

    /// Apply a request's result, unless the request was superseded.
    ///
    /// Returns `true` when the result was applied. A stale token is swallowed
    /// silently (logged at debug) and changes nothing; the abort path is
    /// explicitly not an error.
    pub fn finish(&mut self, token: LoadToken, result: Result<Dataset, LoadError>) -> bool {
        if token.generation != self.generation {
            log::debug!(
                "discarding superseded load result (generation {} < {})",
                token.generation,
                self.generation
            );
            return false;
        }
        match result {
            Ok(dataset) => {
                // Wholesale replacement: the old dataset and its palette go
                // away together.
                self.palette = Some(derive_palette(&dataset));
                self.dataset = Some(Arc::new(dataset));
                self.state = LoadState::Ready;
                log::info!("dataset loaded (generation {})", token.generation);
            }
            Err(err) => {
                log::warn!("dataset load failed: {err}");
                self.dataset = None;
                self.palette = None;
                self.state = LoadState::Error(err.user_message().to_string());
            }
        }
        true
    }

    /// Drive one full load against a source: begin, fetch, finish.
    pub fn load(&mut self, source: &dyn DataSource) -> &LoadState {
        let token = self.begin();
        let result = source.fetch();
        self.finish(token, result);
        &self.state
    }
}
