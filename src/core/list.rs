//! # List View-Model
//!
//! Owns the authoritative recipe collection for the list screen and the
//! cells that back its rows.
//!
//! The filtered/sorted view shown on screen is *not* stored here. The screen
//! keeps a `ListQuery` and recomputes `derived_view()` whenever the query or
//! the collection changes.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::api::RecipeError;
use crate::core::action::{Action, Outbox};
use crate::core::cell::{CellViewModel, RecipeCell};
use crate::core::coordinator::CoordinatorId;
use crate::core::event::EventChannel;
use crate::core::load::{LoadCycle, LoadState};
use crate::core::recipe::{RecipeSummary, SearchScope, SortKey};
use crate::core::repository::Repository;

/// Inputs of the list screen's derived view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search_text: String,
    pub scope: SearchScope,
    pub sort_key: SortKey,
}

impl ListQuery {
    pub fn new(sort_key: SortKey, scope: SearchScope) -> Self {
        Self {
            search_text: String::new(),
            scope,
            sort_key,
        }
    }
}

pub struct ListViewModel {
    owner: CoordinatorId,
    repository: Arc<Repository>,
    outbox: Outbox,
    load: LoadCycle,
    all: Vec<RecipeSummary>,
    cells: Vec<RecipeCell>,
    on_recipe_chosen: EventChannel<String>,
}

impl ListViewModel {
    /// `owner` is the coordinator that fetch completions are routed back to.
    pub fn new(owner: CoordinatorId, repository: Arc<Repository>, outbox: Outbox) -> Self {
        Self {
            owner,
            repository,
            outbox,
            load: LoadCycle::new(),
            all: Vec::new(),
            cells: Vec::new(),
            on_recipe_chosen: EventChannel::new(),
        }
    }

    /// Starts a fetch. The result comes back as `Action::SummariesLoaded`.
    pub fn reload(&mut self) {
        let generation = self.load.begin();
        info!("Reloading recipe list (generation {})", generation);

        let repository = Arc::clone(&self.repository);
        let coordinator = self.owner;
        self.outbox.spawn(async move {
            let result = repository.fetch_summaries().await;
            Action::SummariesLoaded {
                coordinator,
                generation,
                result,
            }
        });
    }

    /// Applies a fetch completion. Stale generations are ignored.
    pub fn apply_summaries(
        &mut self,
        generation: u64,
        result: Result<Vec<RecipeSummary>, RecipeError>,
    ) {
        if !self.load.accepts(generation) {
            debug!(
                "Dropping stale list completion (generation {}, current {})",
                generation,
                self.load.generation()
            );
            return;
        }

        match result {
            Ok(summaries) => {
                self.cells = summaries.iter().cloned().map(|s| self.cell_for(s)).collect();
                self.all = summaries;
                info!("Recipe list loaded: {} recipes", self.all.len());
                self.load.finish();
            }
            Err(error) => {
                warn!("Recipe list failed to load: {}", error);
                self.load.fail(error);
            }
        }
    }

    fn cell_for(&self, summary: RecipeSummary) -> RecipeCell {
        let cell = CellViewModel::new(summary);

        let chosen = self.on_recipe_chosen.clone();
        cell.on_selected
            .subscribe(move |summary: &RecipeSummary| {
                chosen.emit(&summary.id);
            });

        let errors = self.load.on_receive_error.clone();
        cell.on_error.subscribe(move |error: &RecipeError| {
            errors.emit(error);
        });

        cell
    }

    pub fn state(&self) -> &LoadState {
        self.load.state()
    }

    /// The authoritative, unfiltered collection from the last successful load.
    pub fn all(&self) -> &[RecipeSummary] {
        &self.all
    }

    pub fn cells(&self) -> &[RecipeCell] {
        &self.cells
    }

    pub fn cell(&self, id: &str) -> Option<&RecipeCell> {
        self.cells.iter().find(|cell| cell.data().id == id)
    }

    /// Selects the cell for `id`. Returns false if there is none.
    pub fn select(&self, id: &str) -> bool {
        match self.cell(id) {
            Some(cell) => {
                cell.select();
                true
            }
            None => false,
        }
    }

    pub fn filter_for(&self, search_text: Option<&str>, scope: SearchScope) -> Vec<RecipeSummary> {
        self.repository.filter(&self.all, search_text, scope)
    }

    pub fn sort_by(&self, key: SortKey, items: &[RecipeSummary]) -> Vec<RecipeSummary> {
        self.repository.sort(items, key)
    }

    /// Filters, then sorts, the authoritative collection.
    pub fn derived_view(&self, query: &ListQuery) -> Vec<RecipeSummary> {
        let filtered = self.filter_for(Some(&query.search_text), query.scope);
        self.sort_by(query.sort_key, &filtered)
    }

    pub fn on_start_updating(&self) -> &EventChannel<()> {
        &self.load.on_start_updating
    }

    pub fn on_finish_updating(&self) -> &EventChannel<()> {
        &self.load.on_finish_updating
    }

    pub fn on_receive_error(&self) -> &EventChannel<RecipeError> {
        &self.load.on_receive_error
    }

    /// Fires with the recipe id when one of the cells is selected.
    pub fn on_recipe_chosen(&self) -> &EventChannel<String> {
        &self.on_recipe_chosen
    }
}
