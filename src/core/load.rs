//! # Load Cycle
//!
//! The load protocol shared by every screen view-model:
//!
//! ```text
//! Idle ──begin()──▶ Loading ──finish()──▶ Loaded
//!                      │
//!                      └──fail(e)──▶ Failed(e)
//! ```
//!
//! Each `begin()` advances a generation counter and returns it. The fetch
//! carries that number back with its result, and `accepts()` only lets the
//! latest one through. A completion from an older reload, or one arriving
//! after `invalidate()`, is dropped.

use crate::api::RecipeError;
use crate::core::event::EventChannel;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(RecipeError),
}

#[derive(Debug, Default)]
pub struct LoadCycle {
    state: LoadState,
    generation: u64,
    pub on_start_updating: EventChannel<()>,
    pub on_finish_updating: EventChannel<()>,
    pub on_receive_error: EventChannel<RecipeError>,
}

impl LoadCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new load and returns the generation its completion must carry.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.on_start_updating.emit(&());
        self.generation
    }

    /// True only for the completion of the most recent `begin()`.
    pub fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && self.state == LoadState::Loading
    }

    pub fn finish(&mut self) {
        self.state = LoadState::Loaded;
        self.on_finish_updating.emit(&());
    }

    pub fn fail(&mut self, error: RecipeError) {
        self.state = LoadState::Failed(error.clone());
        self.on_receive_error.emit(&error);
    }

    /// Makes any in-flight completion stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        if self.state == LoadState::Loading {
            self.state = LoadState::Idle;
        }
    }

    pub fn unsubscribe_all(&self) {
        self.on_start_updating.clear();
        self.on_finish_updating.clear();
        self.on_receive_error.clear();
    }
}
