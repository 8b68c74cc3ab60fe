//! # Coordinators
//!
//! Coordinators own screen transitions. Each one builds the view-model for
//! its screen, pushes the screen, and reacts to "recipe chosen" by starting
//! a child coordinator.
//!
//! ```text
//! App (root, owns Repository)
//! └── List
//!     └── Details (recipe a)
//!         └── Details (related recipe b)
//! ```
//!
//! The tree lives in an `Arena`. A parent tracks its children by id and
//! each child names its delegate (the parent) by id. When a details screen is
//! popped its coordinator tears down its view-model, the delegate drops it
//! from `children`, and the slot is released. A coordinator is alive exactly
//! as long as its screen is on the `NavigationStack`.
//!
//! `App` is the single owner of the arena and the stack. The event loop
//! feeds it actions with `dispatch()`.

mod arena;
mod details;
mod list;
mod navigation;

pub use arena::{Arena, CoordinatorId, Node};
pub use details::{DETAILS_TITLE, DetailsCoordinator};
pub use list::{LIST_TITLE, ListCoordinator};
pub use navigation::{NavigationStack, ScreenEntry, ScreenKind};

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::action::{Action, Effect, Outbox};
use crate::core::details::DetailsViewModel;
use crate::core::event::EventChannel;
use crate::core::list::ListViewModel;
use crate::core::repository::Repository;

/// Root coordinator. The only one without a parent.
pub struct AppCoordinator {
    repository: Arc<Repository>,
}

impl AppCoordinator {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }
}

pub enum Coordinator {
    App(AppCoordinator),
    List(ListCoordinator),
    Details(DetailsCoordinator),
}

impl Coordinator {
    fn repository(&self) -> Arc<Repository> {
        match self {
            Coordinator::App(app) => Arc::clone(&app.repository),
            Coordinator::List(list) => Arc::clone(list.repository()),
            Coordinator::Details(details) => Arc::clone(details.repository()),
        }
    }

    fn finish(&mut self) {
        if let Coordinator::Details(details) = self {
            details.finish();
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Coordinator::App(_) => "app",
            Coordinator::List(_) => "list",
            Coordinator::Details(_) => "details",
        }
    }
}

/// Turns a screen's "recipe chosen" events into `Action::RecipeChosen`.
fn forward_choices(channel: &EventChannel<String>, from: CoordinatorId, outbox: Outbox) {
    channel.subscribe(move |recipe_id: &String| {
        outbox.post(Action::RecipeChosen {
            from,
            recipe_id: recipe_id.clone(),
        });
    });
}

/// The view-model behind the top screen.
pub enum Screen<'a> {
    List(&'a ListViewModel),
    Details(&'a DetailsViewModel),
}

pub struct App {
    arena: Arena,
    navigation: NavigationStack,
    outbox: Outbox,
    root: CoordinatorId,
}

impl App {
    pub fn new(repository: Arc<Repository>, outbox: Outbox) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(None, |_| Coordinator::App(AppCoordinator::new(repository)));
        Self {
            arena,
            navigation: NavigationStack::new(),
            outbox,
            root,
        }
    }

    /// Creates the list coordinator under the root and shows the list.
    pub fn start(&mut self) -> Option<CoordinatorId> {
        let root = self.arena.get(self.root)?;
        if !root.children.is_empty() {
            warn!("App already started");
            return None;
        }

        let repository = root.coordinator.repository();
        let outbox = self.outbox.clone();
        let id = self.arena.insert(Some(self.root), |_| {
            Coordinator::List(ListCoordinator::new(repository, outbox))
        });
        self.arena.get_mut(self.root)?.children.push(id);

        if let Some(Node {
            coordinator: Coordinator::List(list),
            ..
        }) = self.arena.get_mut(id)
        {
            list.start(id, &mut self.navigation);
        }
        Some(id)
    }

    /// Starts a details coordinator as a child of `from`.
    ///
    /// Only the coordinator whose screen is on top may navigate; a choice
    /// from anywhere else arrived too late to act on.
    fn show_details(&mut self, from: CoordinatorId, recipe_id: &str) -> Option<CoordinatorId> {
        let Some(parent) = self.arena.get(from) else {
            debug!("Ignoring choice of {} from released coordinator", recipe_id);
            return None;
        };
        if self.navigation.top().map(|entry| entry.coordinator) != Some(from) {
            debug!("Ignoring choice of {} from a covered screen", recipe_id);
            return None;
        }

        let repository = parent.coordinator.repository();
        let outbox = self.outbox.clone();
        let id = self.arena.insert(Some(from), |_| {
            Coordinator::Details(DetailsCoordinator::new(recipe_id, repository, outbox))
        });
        self.arena.get_mut(from)?.children.push(id);

        if let Some(Node {
            coordinator: Coordinator::Details(details),
            ..
        }) = self.arena.get_mut(id)
        {
            details.start(id, &mut self.navigation);
        }
        Some(id)
    }

    /// Completion signal: tears down `id` and everything below it, tells its
    /// delegate, and releases it. Returns false if it was already gone.
    pub fn finish(&mut self, id: CoordinatorId) -> bool {
        let Some(mut node) = self.arena.remove(id) else {
            return false;
        };

        for child in std::mem::take(&mut node.children) {
            self.finish(child);
        }

        node.coordinator.finish();
        self.navigation.remove_owned_by(id);

        match node.delegate.and_then(|delegate| self.arena.get_mut(delegate)) {
            Some(parent) => parent.children.retain(|child| *child != id),
            None => debug!("Coordinator {:?} finished without a live delegate", id),
        }
        info!("Coordinator {:?} ({}) finished", id, node.coordinator.kind());
        true
    }

    /// Pops the top screen. The root list can't be popped.
    pub fn go_back(&mut self) -> bool {
        match self.navigation.pop() {
            Some(entry) => self.finish(entry.coordinator),
            None => false,
        }
    }

    /// Re-invokes the top screen's load.
    pub fn retry(&mut self) -> bool {
        let Some(top) = self.navigation.top().map(|entry| entry.coordinator) else {
            return false;
        };
        match self.arena.get_mut(top).map(|node| &mut node.coordinator) {
            Some(Coordinator::List(list)) => match list.view_model_mut() {
                Some(vm) => {
                    vm.reload();
                    true
                }
                None => false,
            },
            Some(Coordinator::Details(details)) => match details.view_model_mut() {
                Some(vm) => {
                    vm.reload_data();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Selects the recipe `id` on the top screen: a list row, or a related
    /// recipe on a details screen.
    pub fn select(&self, id: &str) -> bool {
        match self.top_screen() {
            Some(Screen::List(vm)) => vm.select(id),
            Some(Screen::Details(vm)) => vm.select_related(id),
            None => false,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        match action {
            Action::SummariesLoaded {
                coordinator,
                generation,
                result,
            } => match self.arena.get_mut(coordinator).map(|node| &mut node.coordinator) {
                Some(Coordinator::List(list)) => {
                    if let Some(vm) = list.view_model_mut() {
                        vm.apply_summaries(generation, result);
                    }
                    Effect::Redraw
                }
                _ => {
                    debug!("List completion for released coordinator {:?}", coordinator);
                    Effect::None
                }
            },
            Action::DetailLoaded {
                coordinator,
                generation,
                result,
            } => match self.arena.get_mut(coordinator).map(|node| &mut node.coordinator) {
                Some(Coordinator::Details(details)) => {
                    if let Some(vm) = details.view_model_mut() {
                        vm.apply_detail(generation, result);
                    }
                    Effect::Redraw
                }
                _ => {
                    debug!("Detail completion for released coordinator {:?}", coordinator);
                    Effect::None
                }
            },
            Action::RecipeChosen { from, recipe_id } => {
                if self.show_details(from, &recipe_id).is_some() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Action::Back => {
                if self.go_back() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Action::Retry => {
                if self.retry() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Action::Quit => Effect::Quit,
        }
    }

    pub fn root(&self) -> CoordinatorId {
        self.root
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn coordinator(&self, id: CoordinatorId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Children of `id`, empty if `id` is gone.
    pub fn children(&self, id: CoordinatorId) -> &[CoordinatorId] {
        self.arena
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live coordinators, root included.
    pub fn coordinator_count(&self) -> usize {
        self.arena.len()
    }

    pub fn screen(&self, id: CoordinatorId) -> Option<Screen<'_>> {
        match &self.arena.get(id)?.coordinator {
            Coordinator::List(list) => list.view_model().map(Screen::List),
            Coordinator::Details(details) => details.view_model().map(Screen::Details),
            Coordinator::App(_) => None,
        }
    }

    pub fn top_screen(&self) -> Option<Screen<'_>> {
        self.screen(self.navigation.top()?.coordinator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RecipeError, SimilarElement};
    use crate::core::load::LoadState;
    use crate::test_support::{StubSource, element, next_action, settle, test_app};

    fn catalog() -> Arc<StubSource> {
        let mut pie = element("pie", "Apple Pie", 1);
        pie.similar = vec![SimilarElement {
            uuid: "tart".into(),
            name: "Apple Tart".into(),
            image: String::new(),
        }];
        let mut tart = element("tart", "Apple Tart", 2);
        tart.similar = vec![SimilarElement {
            uuid: "bread".into(),
            name: "Banana Bread".into(),
            image: String::new(),
        }];
        Arc::new(StubSource::new(vec![
            pie,
            tart,
            element("bread", "Banana Bread", 3),
        ]))
    }

    fn top(app: &App) -> CoordinatorId {
        app.navigation().top().unwrap().coordinator
    }

    fn top_list(app: &App) -> &ListViewModel {
        match app.top_screen() {
            Some(Screen::List(vm)) => vm,
            _ => panic!("list screen is not on top"),
        }
    }

    fn top_details(app: &App) -> &DetailsViewModel {
        match app.top_screen() {
            Some(Screen::Details(vm)) => vm,
            _ => panic!("details screen is not on top"),
        }
    }

    /// Selects `id` on the top screen and applies the resulting navigation.
    async fn open(app: &mut App, rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>, id: &str) {
        assert!(app.select(id));
        settle(app, rx).await;
    }

    #[tokio::test]
    async fn test_start_shows_loaded_list_under_root() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();

        assert_eq!(app.children(app.root()), &[list]);
        assert_eq!(app.coordinator(list).unwrap().delegate, Some(app.root()));
        assert_eq!(app.navigation().depth(), 1);
        assert_eq!(app.navigation().top().unwrap().kind, ScreenKind::List);

        settle(&mut app, &mut rx).await;
        assert_eq!(*top_list(&app).state(), LoadState::Loaded);
        assert_eq!(top_list(&app).all().len(), 3);
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let (mut app, _rx) = test_app(catalog());
        assert!(app.start().is_some());
        assert!(app.start().is_none());
        assert_eq!(app.children(app.root()).len(), 1);
    }

    #[tokio::test]
    async fn test_choosing_recipe_registers_exactly_one_child() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();
        settle(&mut app, &mut rx).await;

        open(&mut app, &mut rx, "pie").await;

        let children = app.children(list).to_vec();
        assert_eq!(children.len(), 1);
        let details = children[0];
        assert_eq!(app.coordinator(details).unwrap().delegate, Some(list));
        assert_eq!(top(&app), details);
        assert_eq!(app.navigation().depth(), 2);
        assert_eq!(top_details(&app).recipe().unwrap().name, "Apple Pie");
    }

    #[tokio::test]
    async fn test_back_removes_child_and_releases_it() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();
        settle(&mut app, &mut rx).await;
        open(&mut app, &mut rx, "pie").await;
        let details = app.children(list)[0];

        assert_eq!(app.dispatch(Action::Back), Effect::Redraw);

        assert!(app.children(list).is_empty());
        assert!(app.coordinator(details).is_none());
        assert_eq!(app.coordinator_count(), 2);
        assert_eq!(top(&app), list);
    }

    #[tokio::test]
    async fn test_back_on_root_does_nothing() {
        let (mut app, mut rx) = test_app(catalog());
        app.start();
        settle(&mut app, &mut rx).await;
        assert_eq!(app.dispatch(Action::Back), Effect::None);
        assert_eq!(app.navigation().depth(), 1);
    }

    #[tokio::test]
    async fn test_finishing_one_child_leaves_the_others() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();
        settle(&mut app, &mut rx).await;

        // First child comes and goes.
        open(&mut app, &mut rx, "bread").await;
        app.dispatch(Action::Back);

        // Then list -> pie -> tart -> bread, recursively through related recipes.
        open(&mut app, &mut rx, "pie").await;
        let pie = app.children(list)[0];
        open(&mut app, &mut rx, "tart").await;
        let tart = app.children(pie)[0];
        open(&mut app, &mut rx, "bread").await;
        let bread = app.children(tart)[0];
        assert_eq!(app.navigation().depth(), 4);

        assert!(app.finish(bread));
        assert!(app.children(tart).is_empty());
        assert_eq!(app.children(pie), &[tart]);
        assert_eq!(app.children(list), &[pie]);
        assert!(!app.finish(bread));
    }

    #[tokio::test]
    async fn test_finishing_parent_releases_descendants() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();
        settle(&mut app, &mut rx).await;
        open(&mut app, &mut rx, "pie").await;
        let pie = app.children(list)[0];
        open(&mut app, &mut rx, "tart").await;
        let tart = app.children(pie)[0];

        assert!(app.finish(pie));
        assert!(app.coordinator(tart).is_none());
        assert!(app.children(list).is_empty());
        assert_eq!(app.navigation().depth(), 1);
        assert_eq!(app.coordinator_count(), 2);
    }

    #[tokio::test]
    async fn test_late_detail_completion_after_back_is_a_no_op() {
        let (mut app, mut rx) = test_app(catalog());
        app.start();
        settle(&mut app, &mut rx).await;

        assert!(app.select("pie"));
        let chosen = next_action(&mut rx).await;
        app.dispatch(chosen);
        // The detail fetch is in flight; leave before it lands.
        app.dispatch(Action::Back);

        let late = next_action(&mut rx).await;
        assert!(matches!(late, Action::DetailLoaded { .. }));
        assert_eq!(app.dispatch(late), Effect::None);
        assert_eq!(app.navigation().depth(), 1);
    }

    #[tokio::test]
    async fn test_choice_from_covered_screen_is_ignored() {
        let (mut app, mut rx) = test_app(catalog());
        let list = app.start().unwrap();
        settle(&mut app, &mut rx).await;
        open(&mut app, &mut rx, "pie").await;

        let effect = app.dispatch(Action::RecipeChosen {
            from: list,
            recipe_id: "bread".into(),
        });
        assert_eq!(effect, Effect::None);
        assert_eq!(app.children(list).len(), 1);
    }

    #[tokio::test]
    async fn test_retry_reloads_failed_top_screen() {
        let source = catalog();
        source.fail_list_with(Some(RecipeError::Transport("offline".into())));
        let (mut app, mut rx) = test_app(source.clone());
        app.start();
        settle(&mut app, &mut rx).await;
        assert!(matches!(top_list(&app).state(), LoadState::Failed(_)));

        source.fail_list_with(None);
        assert_eq!(app.dispatch(Action::Retry), Effect::Redraw);
        settle(&mut app, &mut rx).await;

        assert_eq!(*top_list(&app).state(), LoadState::Loaded);
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut app, _rx) = test_app(catalog());
        assert_eq!(app.dispatch(Action::Quit), Effect::Quit);
    }
}
