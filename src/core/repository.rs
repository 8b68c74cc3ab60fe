//! # Repository
//!
//! Recipe retrieval plus the pure filter/sort transformations.
//!
//! One `Repository` is created at startup and shared by every coordinator
//! through an `Arc`. Each call is independent: it holds no per-request state
//! and never caches results.

use std::sync::Arc;

use chrono::DateTime;
use log::{debug, info};

use crate::api::{RecipeElement, RecipeError, RecipeSource};
use crate::core::recipe::{
    Difficulty, ImageRef, RecipeDetail, RecipeSummary, RelatedRecipe, SearchScope, SortKey,
};

/// Display format for `last_updated`.
const DATE_FORMAT: &str = "%d.%m.%Y";

pub struct Repository {
    source: Arc<dyn RecipeSource>,
}

impl Repository {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// One round trip. Retrying is up to the caller.
    pub async fn fetch_summaries(&self) -> Result<Vec<RecipeSummary>, RecipeError> {
        let container = self.source.get_all_recipes().await?;
        info!(
            "Fetched {} recipes from {}",
            container.recipes.len(),
            self.source.name()
        );
        Ok(container.recipes.iter().map(summary_from).collect())
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<RecipeDetail, RecipeError> {
        let container = self.source.get_recipe(id).await?;
        debug!(
            "Fetched recipe {} with {} similar",
            id,
            container.recipe.similar.len()
        );
        Ok(detail_from(&container.recipe))
    }

    pub fn filter(
        &self,
        summaries: &[RecipeSummary],
        search_text: Option<&str>,
        scope: SearchScope,
    ) -> Vec<RecipeSummary> {
        filter(summaries, search_text, scope)
    }

    pub fn sort(&self, summaries: &[RecipeSummary], key: SortKey) -> Vec<RecipeSummary> {
        sort(summaries, key)
    }
}

/// Keeps the summaries whose scoped fields contain `search_text`,
/// case-insensitively, in their original order.
///
/// Empty or missing text returns the input unchanged.
pub fn filter(
    summaries: &[RecipeSummary],
    search_text: Option<&str>,
    scope: SearchScope,
) -> Vec<RecipeSummary> {
    let needle = match search_text {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return summaries.to_vec(),
    };

    summaries
        .iter()
        .filter(|summary| matches_search(summary, &needle, scope))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase.
fn matches_search(summary: &RecipeSummary, needle: &str, scope: SearchScope) -> bool {
    let name_matches = summary.name.to_lowercase().contains(needle);
    match scope {
        SearchScope::NameOnly => name_matches,
        SearchScope::All => name_matches || summary.description.to_lowercase().contains(needle),
    }
}

/// Stable sort: equal keys keep their input order.
pub fn sort(summaries: &[RecipeSummary], key: SortKey) -> Vec<RecipeSummary> {
    let mut sorted = summaries.to_vec();
    match key {
        SortKey::ByName => {
            sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::ByDate => {
            sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
    }
    sorted
}

// ============================================================================
// Payload conversion
// ============================================================================

fn display_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// The API marks line breaks in instructions with `<br>`.
fn clean_instructions(raw: &str) -> String {
    raw.replace("<br>", "\n").trim().to_string()
}

fn summary_from(element: &RecipeElement) -> RecipeSummary {
    RecipeSummary {
        id: element.uuid.clone(),
        name: element.name.clone(),
        description: element.description.clone().unwrap_or_default(),
        thumbnail: element
            .images
            .first()
            .map(|url| ImageRef::new(url.clone()))
            .unwrap_or_default(),
        last_updated: display_date(element.last_updated),
        timestamp: element.last_updated,
    }
}

fn detail_from(element: &RecipeElement) -> RecipeDetail {
    RecipeDetail {
        id: element.uuid.clone(),
        name: element.name.clone(),
        instructions: clean_instructions(&element.instructions),
        description: element.description.clone().unwrap_or_default(),
        images: element.images.iter().cloned().map(ImageRef::new).collect(),
        difficulty: Difficulty::new(element.difficulty),
        related: element
            .similar
            .iter()
            .map(|similar| RelatedRecipe {
                id: similar.uuid.clone(),
                name: similar.name.clone(),
                image: ImageRef::new(similar.image.clone()),
            })
            .collect(),
        last_updated: display_date(element.last_updated),
    }
}
