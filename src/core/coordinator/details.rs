use std::sync::Arc;

use log::info;

use super::navigation::{NavigationStack, ScreenEntry, ScreenKind};
use super::{CoordinatorId, forward_choices};
use crate::core::action::Outbox;
use crate::core::details::DetailsViewModel;
use crate::core::repository::Repository;

pub const DETAILS_TITLE: &str = "Recipe";

/// Owns one details screen for one recipe id.
pub struct DetailsCoordinator {
    recipe_id: String,
    repository: Arc<Repository>,
    outbox: Outbox,
    view_model: Option<DetailsViewModel>,
}

impl DetailsCoordinator {
    pub fn new(recipe_id: impl Into<String>, repository: Arc<Repository>, outbox: Outbox) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            repository,
            outbox,
            view_model: None,
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    /// Pushes the details screen and starts loading the recipe.
    pub fn start(&mut self, id: CoordinatorId, navigation: &mut NavigationStack) {
        let mut view_model = DetailsViewModel::new(
            id,
            self.recipe_id.clone(),
            Arc::clone(&self.repository),
            self.outbox.clone(),
        );
        forward_choices(view_model.on_recipe_chosen(), id, self.outbox.clone());

        navigation.push(ScreenEntry {
            coordinator: id,
            title: DETAILS_TITLE.to_string(),
            kind: ScreenKind::Details {
                recipe_id: self.recipe_id.clone(),
            },
        });
        info!(
            "Details coordinator {:?} started for recipe {}",
            id, self.recipe_id
        );

        view_model.reload_data();
        self.view_model = Some(view_model);
    }

    /// The screen left the stack: late completions must not reach it.
    pub fn finish(&mut self) {
        if let Some(view_model) = self.view_model.as_mut() {
            view_model.view_will_disappear();
        }
    }

    pub fn view_model(&self) -> Option<&DetailsViewModel> {
        self.view_model.as_ref()
    }

    pub fn view_model_mut(&mut self) -> Option<&mut DetailsViewModel> {
        self.view_model.as_mut()
    }
}
