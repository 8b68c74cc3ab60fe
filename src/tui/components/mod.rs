//! # TUI Components
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: breadcrumb of the navigation stack plus a status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it for
//! one frame:
//! - `RecipeListState` / `RecipeList`: search, sort, scope and the rows
//! - `RecipeDetailsState` / `RecipeDetails`: image pager and related recipes
//!
//! Each component file keeps its state, event and rendering code together,
//! with its tests.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Breadcrumb + status)
//! ├── recipe_list.rs     (List screen)
//! └── recipe_details.rs  (Details screen)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod recipe_details;
pub mod recipe_list;
pub use recipe_details::{RecipeDetails, RecipeDetailsEvent, RecipeDetailsState};
pub use recipe_list::{RecipeList, RecipeListEvent, RecipeListState};
