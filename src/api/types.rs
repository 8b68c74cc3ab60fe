//! Wire payloads returned by the recipe API.

use serde::{Deserialize, Serialize};

/// Response body of `GET /recipes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecipesContainer {
    pub recipes: Vec<RecipeElement>,
}

/// Response body of `GET /recipes/{uuid}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecipeContainer {
    pub recipe: RecipeElement,
}

/// A recipe as the API sends it. The list endpoint omits `similar`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeElement {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Unix timestamp, seconds.
    pub last_updated: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub difficulty: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<SimilarElement>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimilarElement {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}
