use std::sync::Arc;

use log::info;

use super::navigation::{NavigationStack, ScreenEntry, ScreenKind};
use super::{CoordinatorId, forward_choices};
use crate::core::action::Outbox;
use crate::core::list::ListViewModel;
use crate::core::repository::Repository;

pub const LIST_TITLE: &str = "Recipes";

/// Owns the list screen. Root of every navigation flow.
pub struct ListCoordinator {
    repository: Arc<Repository>,
    outbox: Outbox,
    view_model: Option<ListViewModel>,
}

impl ListCoordinator {
    pub fn new(repository: Arc<Repository>, outbox: Outbox) -> Self {
        Self {
            repository,
            outbox,
            view_model: None,
        }
    }

    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    /// Builds the view-model, makes the list the root screen and starts the
    /// first load.
    pub fn start(&mut self, id: CoordinatorId, navigation: &mut NavigationStack) {
        let mut view_model =
            ListViewModel::new(id, Arc::clone(&self.repository), self.outbox.clone());
        forward_choices(view_model.on_recipe_chosen(), id, self.outbox.clone());

        navigation.set_root(ScreenEntry {
            coordinator: id,
            title: LIST_TITLE.to_string(),
            kind: ScreenKind::List,
        });
        info!("List coordinator {:?} started", id);

        view_model.reload();
        self.view_model = Some(view_model);
    }

    pub fn view_model(&self) -> Option<&ListViewModel> {
        self.view_model.as_ref()
    }

    pub fn view_model_mut(&mut self) -> Option<&mut ListViewModel> {
        self.view_model.as_mut()
    }
}
