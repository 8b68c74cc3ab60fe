//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the top screen,
//! and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//!            ┌──────────── Outbox (fetch completions, choices) ◀── tokio tasks
//!            ▼
//! keys ──▶ TuiState ──Action──▶ App::dispatch() ──Effect──▶ redraw / quit
//! ```
//!
//! Each turn drains the outbox first, then terminal events. Everything is
//! applied on this thread, so a completion never races a key press.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 250ms, only redraws on events, completions or
//!   terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::HttpRecipeSource;
use crate::core::action::{Action, Effect, Outbox};
use crate::core::config::ResolvedConfig;
use crate::core::coordinator::{App, Screen};
use crate::core::load::LoadState;
use crate::core::recipe::{SearchScope, SortKey};
use crate::core::repository::Repository;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    RecipeDetailsEvent, RecipeDetailsState, RecipeListEvent, RecipeListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list: RecipeListState,
    pub details: RecipeDetailsState,
}

impl TuiState {
    pub fn new(sort_key: SortKey, scope: SearchScope) -> Self {
        Self {
            list: RecipeListState::new(sort_key, scope),
            details: RecipeDetailsState::new(),
        }
    }

    /// Brings the top screen's component state up to date with its view-model.
    pub fn sync(&mut self, app: &App) {
        let Some(top) = app.navigation().top().map(|entry| entry.coordinator) else {
            return;
        };
        match app.screen(top) {
            Some(Screen::List(vm)) => self.list.sync(top, vm),
            Some(Screen::Details(vm)) => self.details.sync(top, vm),
            None => {}
        }
    }

    /// Routes a terminal event. Global keys become actions; the rest go to
    /// the top screen's component. Opening a recipe goes through the cell's
    /// selection so the view-model announces the choice itself.
    pub fn handle_event(&mut self, app: &App, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::Retry => return Some(Action::Retry),
            TuiEvent::Resize => return None,
            _ => {}
        }

        match app.top_screen()? {
            Screen::List(_) => match self.list.handle_event(event) {
                Some(RecipeListEvent::Open(id)) => {
                    if !app.select(&id) {
                        debug!("Row {} has no cell to select", id);
                    }
                    None
                }
                None => None,
            },
            Screen::Details(_) => {
                if matches!(event, TuiEvent::Back) {
                    return Some(Action::Back);
                }
                match self.details.handle_event(event) {
                    Some(RecipeDetailsEvent::OpenRelated(id)) => {
                        if !app.select(&id) {
                            debug!("Related recipe {} has no cell to select", id);
                        }
                        None
                    }
                    None => None,
                }
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = HttpRecipeSource::new(config.base_url.clone(), config.request_timeout);
    let repository = Arc::new(Repository::new(Arc::new(source)));
    info!("Using recipe source {}", repository.source_name());

    let (outbox, rx) = Outbox::channel();
    let mut app = App::new(repository, outbox);
    let mut tui = TuiState::new(config.sort_key, config.scope);
    app.start();

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut tui, rx);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    mut rx: UnboundedReceiver<Action>,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Apply everything background tasks and view-models posted
        while let Ok(action) = rx.try_recv() {
            match app.dispatch(action) {
                Effect::Quit => return Ok(()),
                Effect::Redraw => needs_redraw = true,
                Effect::None => {}
            }
        }

        let loading = app
            .top_screen()
            .is_some_and(|screen| matches!(ui::load_state(&screen), LoadState::Loading));
        if loading {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync(app);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Rows must reflect the latest query before a key acts on them
            tui.sync(app);
            let Some(action) = tui.handle_event(app, &event) else {
                continue;
            };
            if app.dispatch(action) == Effect::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}
