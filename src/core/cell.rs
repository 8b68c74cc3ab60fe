//! Cell view-models: one presentation record plus its notification channels.

use crate::api::RecipeError;
use crate::core::event::EventChannel;
use crate::core::recipe::{ImageRef, RecipeSummary, RelatedRecipe};

pub type RecipeCell = CellViewModel<RecipeSummary>;
pub type ImageCell = CellViewModel<ImageRef>;
pub type RelatedCell = CellViewModel<RelatedRecipe>;

/// Backs one row or tile on a screen.
///
/// The renderer subscribes to `on_data_changed`; the owning screen
/// view-model subscribes to `on_selected` and `on_error`.
#[derive(Debug)]
pub struct CellViewModel<T> {
    data: T,
    pub on_data_changed: EventChannel<T>,
    pub on_selected: EventChannel<T>,
    pub on_error: EventChannel<RecipeError>,
}

impl<T> CellViewModel<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            on_data_changed: EventChannel::new(),
            on_selected: EventChannel::new(),
            on_error: EventChannel::new(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// The user picked this cell.
    pub fn select(&self) {
        self.on_selected.emit(&self.data);
    }

    /// Points the cell at new data. Subscriptions are kept.
    pub fn rebind(&mut self, data: T) {
        self.data = data;
        self.on_data_changed.emit(&self.data);
    }

    /// Reports a failure from a collaborator working on this cell's behalf,
    /// e.g. the image loader.
    pub fn report_error(&self, error: RecipeError) {
        self.on_error.emit(&error);
    }
}
