pub mod http;
pub mod source;
pub mod types;

pub use http::HttpRecipeSource;
pub use source::{GENERIC_ERROR_TITLE, RecipeError, RecipeSource};
pub use types::{RecipeContainer, RecipeElement, RecipesContainer, SimilarElement};
