use std::fmt;

use async_trait::async_trait;

use super::types::{RecipeContainer, RecipesContainer};

/// Title shown when an error carries no recognized shape.
pub const GENERIC_ERROR_TITLE: &str = "Something went wrong";

/// Errors that can occur while fetching recipes.
///
/// Every failure the core knows about is one of these. They are surfaced
/// unmodified from the data-access layer to the screen view-models.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// Network-level failure (timeout, DNS, connection refused, HTTP 5xx).
    Transport(String),
    /// The payload arrived but could not be decoded.
    Decoding(String),
    /// The requested recipe does not exist.
    NotFound(String),
    /// Anything else.
    Unknown(String),
}

impl RecipeError {
    /// User-facing title for the retry prompt.
    pub fn title(&self) -> &'static str {
        match self {
            RecipeError::Transport(_) => "No connection",
            RecipeError::Decoding(_) => "Unexpected response",
            RecipeError::NotFound(_) => "Recipe not found",
            RecipeError::Unknown(_) => GENERIC_ERROR_TITLE,
        }
    }
}

impl fmt::Display for RecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeError::Transport(msg) => write!(f, "network error: {msg}"),
            RecipeError::Decoding(msg) => write!(f, "could not read the server response: {msg}"),
            RecipeError::NotFound(what) => write!(f, "{what} was not found"),
            RecipeError::Unknown(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RecipeError {}

/// The data-access collaborator: an async request/response boundary.
///
/// The core never depends on how the payload travels, only on this contract.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Fetches every recipe in the catalog.
    async fn get_all_recipes(&self) -> Result<RecipesContainer, RecipeError>;

    /// Fetches a single recipe with its related recipes.
    async fn get_recipe(&self, id: &str) -> Result<RecipeContainer, RecipeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_errors_have_specific_titles() {
        assert_eq!(RecipeError::Transport("x".into()).title(), "No connection");
        assert_eq!(RecipeError::Decoding("x".into()).title(), "Unexpected response");
        assert_eq!(RecipeError::NotFound("x".into()).title(), "Recipe not found");
    }

    #[test]
    fn test_unknown_error_falls_back_to_generic_title() {
        let error = RecipeError::Unknown("boom".into());
        assert_eq!(error.title(), GENERIC_ERROR_TITLE);
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_not_found_display() {
        let error = RecipeError::NotFound("recipe abc".into());
        assert_eq!(error.to_string(), "recipe abc was not found");
    }
}
