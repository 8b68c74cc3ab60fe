//! # Recipe List Component
//!
//! The list screen: a search line, the current sort and scope, and the
//! filtered, sorted rows.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecipeListState` lives in `TuiState` and owns the `ListQuery`
//! - `RecipeList` is created each frame with borrowed state
//!
//! The rows are the view-model's `derived_view()` for the current query.
//! They are recomputed when the query changes or when the view-model reports
//! a finished load, never on every frame.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::core::coordinator::CoordinatorId;
use crate::core::list::{ListQuery, ListViewModel};
use crate::core::recipe::{RecipeSummary, SearchScope, SortKey};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the list screen.
pub struct RecipeListState {
    pub query: ListQuery,
    pub list_state: ListState,
    rows: Vec<RecipeSummary>,
    /// Query the rows were computed for.
    applied: Option<ListQuery>,
    /// Set by the view-model's `on_finish_updating`.
    stale: Rc<Cell<bool>>,
    bound: Option<CoordinatorId>,
}

/// Events emitted by the list screen.
#[derive(Debug, PartialEq, Eq)]
pub enum RecipeListEvent {
    Open(String),
}

impl RecipeListState {
    pub fn new(sort_key: SortKey, scope: SearchScope) -> Self {
        Self {
            query: ListQuery::new(sort_key, scope),
            list_state: ListState::default(),
            rows: Vec::new(),
            applied: None,
            stale: Rc::new(Cell::new(true)),
            bound: None,
        }
    }

    /// Brings the rows up to date with `view_model`. Subscribes to its
    /// finished-load event the first time a given screen is seen.
    pub fn sync(&mut self, owner: CoordinatorId, view_model: &ListViewModel) {
        if self.bound != Some(owner) {
            let stale = Rc::clone(&self.stale);
            view_model.on_finish_updating().subscribe(move |_| stale.set(true));
            self.bound = Some(owner);
            self.stale.set(true);
        }

        if !self.stale.replace(false) && self.applied.as_ref() == Some(&self.query) {
            return;
        }

        self.rows = view_model.derived_view(&self.query);
        self.applied = Some(self.query.clone());
        let selected = match self.list_state.selected() {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn rows(&self) -> &[RecipeSummary] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<&RecipeSummary> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }
}

impl EventHandler for RecipeListState {
    type Event = RecipeListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RecipeListEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.query.search_text.push(*c);
                self.list_state.select(Some(0));
                None
            }
            TuiEvent::Backspace => {
                self.query.search_text.pop();
                None
            }
            // Esc on the root screen clears the search instead
            TuiEvent::Back => {
                self.query.search_text.clear();
                None
            }
            TuiEvent::CycleSort => {
                self.query.sort_key = self.query.sort_key.next();
                None
            }
            TuiEvent::CycleScope => {
                self.query.scope = self.query.scope.next();
                None
            }
            TuiEvent::CursorUp => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                if let Some(i) = self.list_state.selected()
                    && i + 1 < self.rows.len()
                {
                    self.list_state.select(Some(i + 1));
                }
                None
            }
            TuiEvent::Submit => self
                .selected_row()
                .map(|row| RecipeListEvent::Open(row.id.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the list screen.
pub struct RecipeList<'a> {
    state: &'a mut RecipeListState,
}

impl<'a> RecipeList<'a> {
    pub fn new(state: &'a mut RecipeListState) -> Self {
        Self { state }
    }
}

impl Component for RecipeList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, rows_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let query = &self.state.query;
        let search = Paragraph::new(Line::from(vec![
            Span::raw(query.search_text.as_str()),
            Span::styled("█", Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Search: {} ", query.scope.label()))
                .title_bottom(Line::from(format!(" {} ", query.sort_key.label())).right_aligned()),
        );
        frame.render_widget(search, search_area);

        if self.state.rows.is_empty() {
            let text = if query.search_text.is_empty() {
                "No recipes."
            } else {
                "Nothing matches your search."
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                rows_area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .map(|row| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(row.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(
                            format!("  {}", row.last_updated),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::styled(
                        first_line(&row.description).to_string(),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, rows_area, &mut self.state.list_state);
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
