//! # Actions
//!
//! Everything that reaches the event loop becomes an `Action`.
//! A fetch resolved? That's `Action::SummariesLoaded` or `Action::DetailLoaded`.
//! A cell was picked? That's `Action::RecipeChosen`.
//!
//! Background tasks never touch coordinators or view-models. They post an
//! action through the `Outbox` and the loop applies it with
//! `App::dispatch()`, one at a time, on the UI thread:
//!
//! ```text
//! tokio task ──Action──▶ Outbox ──▶ loop ──▶ App::dispatch() ──▶ Effect
//! ```

use std::future::Future;

use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::RecipeError;
use crate::core::coordinator::CoordinatorId;
use crate::core::recipe::{RecipeDetail, RecipeSummary};

#[derive(Debug)]
pub enum Action {
    /// A list fetch resolved. `generation` identifies the reload that issued it.
    SummariesLoaded {
        coordinator: CoordinatorId,
        generation: u64,
        result: Result<Vec<RecipeSummary>, RecipeError>,
    },
    /// A detail fetch resolved.
    DetailLoaded {
        coordinator: CoordinatorId,
        generation: u64,
        result: Result<RecipeDetail, RecipeError>,
    },
    /// A screen owned by `from` picked a recipe to open.
    RecipeChosen { from: CoordinatorId, recipe_id: String },
    /// Pop the top screen.
    Back,
    /// Reload the top screen (the retry prompt's action).
    Retry,
    Quit,
}

/// What the loop should do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

/// Sending half of the loop's action queue.
#[derive(Clone, Debug)]
pub struct Outbox {
    tx: UnboundedSender<Action>,
}

impl Outbox {
    pub fn channel() -> (Outbox, UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Outbox { tx }, rx)
    }

    pub fn post(&self, action: Action) {
        if self.tx.send(action).is_err() {
            warn!("Failed to post action: receiver dropped");
        }
    }

    /// Runs `task` on the runtime and posts the action it resolves to.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = task.await;
            if tx.send(action).is_err() {
                warn!("Failed to deliver fetch completion: receiver dropped");
            }
        });
    }
}
