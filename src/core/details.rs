//! # Details View-Model
//!
//! Loads one recipe by id and derives two cell sequences from it: the
//! recipe's own images and its related recipes. Selecting a related recipe
//! fires `on_recipe_chosen` with that recipe's id, which lets the owning
//! coordinator open another details screen on top.
//!
//! There is no cancellation of an in-flight fetch. `view_will_disappear()`
//! instead drops every subscriber and invalidates the pending generation, so
//! a completion that arrives afterwards changes nothing and notifies no one.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::api::RecipeError;
use crate::core::action::{Action, Outbox};
use crate::core::cell::{CellViewModel, ImageCell, RelatedCell};
use crate::core::coordinator::CoordinatorId;
use crate::core::event::EventChannel;
use crate::core::load::{LoadCycle, LoadState};
use crate::core::recipe::{ImageRef, RecipeDetail, RelatedRecipe};
use crate::core::repository::Repository;

pub struct DetailsViewModel {
    owner: CoordinatorId,
    recipe_id: String,
    repository: Arc<Repository>,
    outbox: Outbox,
    load: LoadCycle,
    recipe: Option<RecipeDetail>,
    image_cells: Vec<ImageCell>,
    related_cells: Vec<RelatedCell>,
    on_recipe_chosen: EventChannel<String>,
    torn_down: bool,
}

impl DetailsViewModel {
    pub fn new(
        owner: CoordinatorId,
        recipe_id: impl Into<String>,
        repository: Arc<Repository>,
        outbox: Outbox,
    ) -> Self {
        Self {
            owner,
            recipe_id: recipe_id.into(),
            repository,
            outbox,
            load: LoadCycle::new(),
            recipe: None,
            image_cells: Vec::new(),
            related_cells: Vec::new(),
            on_recipe_chosen: EventChannel::new(),
            torn_down: false,
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    /// Starts a fetch. The result comes back as `Action::DetailLoaded`.
    /// Does nothing once the screen has gone away.
    pub fn reload_data(&mut self) {
        if self.torn_down {
            debug!("Ignoring reload of torn-down details {}", self.recipe_id);
            return;
        }

        let generation = self.load.begin();
        info!(
            "Loading recipe {} (generation {})",
            self.recipe_id, generation
        );

        let repository = Arc::clone(&self.repository);
        let coordinator = self.owner;
        let recipe_id = self.recipe_id.clone();
        self.outbox.spawn(async move {
            let result = repository.fetch_detail(&recipe_id).await;
            Action::DetailLoaded {
                coordinator,
                generation,
                result,
            }
        });
    }

    pub fn apply_detail(&mut self, generation: u64, result: Result<RecipeDetail, RecipeError>) {
        if self.torn_down || !self.load.accepts(generation) {
            debug!(
                "Dropping stale completion for recipe {} (generation {})",
                self.recipe_id, generation
            );
            return;
        }

        match result {
            Ok(recipe) => {
                self.image_cells = recipe
                    .images
                    .iter()
                    .cloned()
                    .map(|image| self.image_cell_for(image))
                    .collect();
                self.related_cells = recipe
                    .related
                    .iter()
                    .cloned()
                    .map(|related| self.related_cell_for(related))
                    .collect();
                info!(
                    "Recipe {} loaded: {} images, {} related",
                    recipe.id,
                    self.image_cells.len(),
                    self.related_cells.len()
                );
                self.recipe = Some(recipe);
                self.load.finish();
            }
            Err(error) => {
                warn!("Recipe {} failed to load: {}", self.recipe_id, error);
                self.load.fail(error);
            }
        }
    }

    fn image_cell_for(&self, image: ImageRef) -> ImageCell {
        let cell = CellViewModel::new(image);
        let errors = self.load.on_receive_error.clone();
        cell.on_error.subscribe(move |error: &RecipeError| {
            errors.emit(error);
        });
        cell
    }

    fn related_cell_for(&self, related: RelatedRecipe) -> RelatedCell {
        let cell = CellViewModel::new(related);

        let chosen = self.on_recipe_chosen.clone();
        cell.on_selected
            .subscribe(move |related: &RelatedRecipe| {
                chosen.emit(&related.id);
            });

        let errors = self.load.on_receive_error.clone();
        cell.on_error.subscribe(move |error: &RecipeError| {
            errors.emit(error);
        });

        cell
    }

    /// The screen is leaving the navigation stack. Safe to call repeatedly.
    pub fn view_will_disappear(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.load.invalidate();
        self.load.unsubscribe_all();
        self.on_recipe_chosen.clear();
        debug!("Details {} torn down", self.recipe_id);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn state(&self) -> &LoadState {
        self.load.state()
    }

    pub fn recipe(&self) -> Option<&RecipeDetail> {
        self.recipe.as_ref()
    }

    pub fn image_cells(&self) -> &[ImageCell] {
        &self.image_cells
    }

    pub fn related_cells(&self) -> &[RelatedCell] {
        &self.related_cells
    }

    /// Selects the related recipe `id`. Returns false if there is none.
    pub fn select_related(&self, id: &str) -> bool {
        match self.related_cells.iter().find(|cell| cell.data().id == id) {
            Some(cell) => {
                cell.select();
                true
            }
            None => false,
        }
    }

    /// A page indicator only makes sense with more than one image.
    pub fn shows_page_indicator(&self) -> bool {
        self.image_cells.len() > 1
    }

    pub fn shows_related(&self) -> bool {
        !self.related_cells.is_empty()
    }

    pub fn on_start_updating(&self) -> &EventChannel<()> {
        &self.load.on_start_updating
    }

    pub fn on_finish_updating(&self) -> &EventChannel<()> {
        &self.load.on_finish_updating
    }

    pub fn on_receive_error(&self) -> &EventChannel<RecipeError> {
        &self.load.on_receive_error
    }

    pub fn on_recipe_chosen(&self) -> &EventChannel<String> {
        &self.on_recipe_chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimilarElement;
    use crate::test_support::{StubSource, element, stub_repository};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn tart_source() -> Arc<StubSource> {
        let mut pie = element("1", "Apple Pie", 1);
        pie.images = vec!["http://img/pie-1.jpg".into(), "http://img/pie-2.jpg".into()];
        pie.difficulty = 3;
        pie.similar = vec![SimilarElement {
            uuid: "2".into(),
            name: "Apple Tart".into(),
            image: "http://img/tart.jpg".into(),
        }];
        Arc::new(StubSource::new(vec![pie, element("2", "Apple Tart", 2)]))
    }

    fn view_model(
        source: Arc<StubSource>,
        id: &str,
    ) -> (DetailsViewModel, UnboundedReceiver<Action>) {
        let (outbox, rx) = Outbox::channel();
        let vm = DetailsViewModel::new(
            CoordinatorId::for_tests(),
            id,
            stub_repository(source),
            outbox,
        );
        (vm, rx)
    }

    async fn next_detail(
        rx: &mut UnboundedReceiver<Action>,
    ) -> (u64, Result<RecipeDetail, RecipeError>) {
        match rx.recv().await {
            Some(Action::DetailLoaded {
                generation, result, ..
            }) => (generation, result),
            other => panic!("expected DetailLoaded, got {:?}", other),
        }
    }

    fn counter(channel: &EventChannel<()>) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        channel.subscribe(move |_| c.set(c.get() + 1));
        count
    }

    #[tokio::test]
    async fn test_reload_derives_image_and_related_cells() {
        let (mut vm, mut rx) = view_model(tart_source(), "1");
        let finished = counter(vm.on_finish_updating());

        vm.reload_data();
        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);

        assert_eq!(finished.get(), 1);
        assert_eq!(*vm.state(), LoadState::Loaded);
        assert_eq!(vm.recipe().map(|r| r.name.as_str()), Some("Apple Pie"));
        assert_eq!(vm.image_cells().len(), 2);
        assert_eq!(vm.related_cells().len(), 1);
        assert!(vm.shows_page_indicator());
        assert!(vm.shows_related());
    }

    #[tokio::test]
    async fn test_selecting_related_recipe_fires_its_id() {
        let (mut vm, mut rx) = view_model(tart_source(), "1");
        vm.reload_data();
        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);

        let chosen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&chosen);
        vm.on_recipe_chosen()
            .subscribe(move |id: &String| sink.borrow_mut().push(id.clone()));

        assert!(vm.select_related("2"));
        assert_eq!(*chosen.borrow(), vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_id_fails_with_not_found() {
        let (mut vm, mut rx) = view_model(tart_source(), "nope");
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&errors);
        vm.on_receive_error()
            .subscribe(move |e: &RecipeError| sink.borrow_mut().push(e.clone()));

        vm.reload_data();
        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);

        assert_eq!(*errors.borrow(), vec![RecipeError::NotFound("recipe nope".into())]);
        assert!(vm.recipe().is_none());
        assert!(!vm.shows_related());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_loaded_recipe() {
        let source = tart_source();
        let (mut vm, mut rx) = view_model(source.clone(), "1");
        vm.reload_data();
        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);

        source.fail_detail_with(Some(RecipeError::Decoding("bad json".into())));
        vm.reload_data();
        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);

        assert!(matches!(vm.state(), LoadState::Failed(RecipeError::Decoding(_))));
        assert_eq!(vm.recipe().map(|r| r.id.as_str()), Some("1"));
    }

    #[tokio::test]
    async fn test_completion_after_teardown_fires_nothing() {
        let (mut vm, mut rx) = view_model(tart_source(), "1");
        let finished = counter(vm.on_finish_updating());
        let errors = Rc::new(Cell::new(0));
        let e = Rc::clone(&errors);
        vm.on_receive_error().subscribe(move |_| e.set(e.get() + 1));

        vm.reload_data();
        vm.view_will_disappear();
        vm.view_will_disappear();

        let (generation, result) = next_detail(&mut rx).await;
        vm.apply_detail(generation, result);
        vm.apply_detail(generation, Err(RecipeError::Unknown("late".into())));

        assert_eq!(finished.get(), 0);
        assert_eq!(errors.get(), 0);
        assert!(vm.recipe().is_none());
        assert!(vm.is_torn_down());
    }

    #[tokio::test]
    async fn test_reload_after_teardown_is_ignored() {
        let source = tart_source();
        let (mut vm, _rx) = view_model(source.clone(), "1");
        vm.view_will_disappear();
        vm.reload_data();
        tokio::task::yield_now().await;
        assert_eq!(source.detail_calls(), 0);
        assert_eq!(*vm.state(), LoadState::Idle);
    }
}
