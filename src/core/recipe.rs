//! # Recipe Model
//!
//! Presentation-ready records produced by the repository from API payloads,
//! plus the enums that drive the list screen's search and sort.
//!
//! Records are plain immutable values. A reload never edits one in place;
//! it produces a new collection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of steps on the difficulty scale.
pub const MAX_DIFFICULTY: u8 = 5;

/// URL of an image. The core hands these to the image loader and never
/// looks at image bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Symbolic names resolved by the resource-lookup collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Shown until an image resolves, or when a recipe has none.
    Placeholder,
    DifficultyFilled,
    DifficultyEmpty,
}

/// Difficulty level, always within `0..=MAX_DIFFICULTY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Clamps out-of-range levels from the API into the scale.
    pub fn new(level: i64) -> Self {
        Self(level.clamp(0, MAX_DIFFICULTY as i64) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// One icon per step: filled up to the level, empty after.
    pub fn icons(self) -> [Resource; MAX_DIFFICULTY as usize] {
        let mut icons = [Resource::DifficultyEmpty; MAX_DIFFICULTY as usize];
        for icon in icons.iter_mut().take(self.0 as usize) {
            *icon = Resource::DifficultyFilled;
        }
        icons
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: ImageRef,
    /// Display form of `timestamp`.
    pub last_updated: String,
    /// Unix seconds; the sort key for `SortKey::ByDate`.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelatedRecipe {
    pub id: String,
    pub name: String,
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub instructions: String,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub difficulty: Difficulty,
    pub related: Vec<RelatedRecipe>,
    pub last_updated: String,
}

/// Which fields participate in text filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SearchScope {
    /// Name or description.
    #[default]
    All,
    NameOnly,
}

impl SearchScope {
    /// Cycles to the next scope (wraps around)
    pub fn next(self) -> SearchScope {
        match self {
            SearchScope::All => SearchScope::NameOnly,
            SearchScope::NameOnly => SearchScope::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchScope::All => "All",
            SearchScope::NameOnly => "Name",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending, case-insensitive.
    ByName,
    /// Most recent first.
    #[default]
    ByDate,
}

impl SortKey {
    pub fn next(self) -> SortKey {
        match self {
            SortKey::ByName => SortKey::ByDate,
            SortKey::ByDate => SortKey::ByName,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::ByName => "Sort by Name",
            SortKey::ByDate => "Sort by Date",
        }
    }
}
