//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::{RecipeContainer, RecipeElement, RecipeError, RecipeSource, RecipesContainer};
use crate::core::action::{Action, Outbox};
use crate::core::coordinator::App;
use crate::core::recipe::{ImageRef, RecipeSummary};
use crate::core::repository::Repository;

/// An in-memory source whose answers can be changed between calls.
pub struct StubSource {
    recipes: Mutex<Vec<RecipeElement>>,
    list_failure: Mutex<Option<RecipeError>>,
    detail_failure: Mutex<Option<RecipeError>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StubSource {
    pub fn new(recipes: Vec<RecipeElement>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            list_failure: Mutex::new(None),
            detail_failure: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_recipes(&self, recipes: Vec<RecipeElement>) {
        *self.recipes.lock().unwrap() = recipes;
    }

    /// `None` makes the list endpoint succeed again.
    pub fn fail_list_with(&self, error: Option<RecipeError>) {
        *self.list_failure.lock().unwrap() = error;
    }

    pub fn fail_detail_with(&self, error: Option<RecipeError>) {
        *self.detail_failure.lock().unwrap() = error;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn get_all_recipes(&self) -> Result<RecipesContainer, RecipeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.list_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(RecipesContainer {
            recipes: self.recipes.lock().unwrap().clone(),
        })
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeContainer, RecipeError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.detail_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|recipe| recipe.uuid == id)
            .cloned()
            .map(|recipe| RecipeContainer { recipe })
            .ok_or_else(|| RecipeError::NotFound(format!("recipe {id}")))
    }
}

/// A minimal API element.
pub fn element(id: &str, name: &str, last_updated: i64) -> RecipeElement {
    RecipeElement {
        uuid: id.to_string(),
        name: name.to_string(),
        images: Vec::new(),
        last_updated,
        description: Some(String::new()),
        instructions: String::new(),
        difficulty: 0,
        similar: Vec::new(),
    }
}

/// A minimal summary with an empty description.
pub fn summary(id: &str, name: &str, timestamp: i64) -> RecipeSummary {
    RecipeSummary {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        thumbnail: ImageRef::default(),
        last_updated: String::new(),
        timestamp,
    }
}

pub fn stub_repository(source: Arc<StubSource>) -> Arc<Repository> {
    Arc::new(Repository::new(source))
}

/// An app wired to a stub source, not yet started.
pub fn test_app(source: Arc<StubSource>) -> (App, UnboundedReceiver<Action>) {
    let (outbox, rx) = Outbox::channel();
    (App::new(stub_repository(source), outbox), rx)
}

/// Waits for the next action posted to the outbox.
pub async fn next_action(rx: &mut UnboundedReceiver<Action>) -> Action {
    rx.recv().await.expect("outbox closed")
}

/// Feeds posted actions into the app, giving spawned fetches a few chances
/// to run in between.
pub async fn settle(app: &mut App, rx: &mut UnboundedReceiver<Action>) {
    for _ in 0..10 {
        tokio::task::yield_now().await;
        while let Ok(action) = rx.try_recv() {
            app.dispatch(action);
        }
    }
}
