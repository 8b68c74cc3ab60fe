//! HTTP recipe source.
//!
//! Talks to a JSON recipe API:
//! - `GET {base_url}/recipes` for the catalog
//! - `GET {base_url}/recipes/{uuid}` for one recipe and its similar recipes
//!
//! Transport failures and non-success statuses become `RecipeError::Transport`,
//! a 404 becomes `RecipeError::NotFound`, and bodies that don't match the
//! payload types become `RecipeError::Decoding`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::source::{RecipeError, RecipeSource};
use super::types::{RecipeContainer, RecipesContainer};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Recipe API source backed by `reqwest`.
pub struct HttpRecipeSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecipeSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `{base_url}/{path}` and decodes the body as `T`.
    ///
    /// `what` names the resource in `NotFound` errors.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, RecipeError> {
        let url = format!("{}/{}", self.base_url, path);
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RecipeError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Recipe API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(RecipeError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Recipe API error: {} - {}", status.as_u16(), err_body);
            return Err(RecipeError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                err_body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RecipeError::Transport(e.to_string()))?;
        debug!("Recipe API body: {} bytes", body.len());

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode {} from {}: {}", what, url, e);
            RecipeError::Decoding(e.to_string())
        })
    }
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_all_recipes(&self) -> Result<RecipesContainer, RecipeError> {
        self.get_json("recipes", "recipe list").await
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeContainer, RecipeError> {
        self.get_json(&format!("recipes/{id}"), &format!("recipe {id}"))
            .await
    }
}
