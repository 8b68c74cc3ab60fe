//! # Recipe Details Component
//!
//! One recipe: name, difficulty, an image pager, description, instructions
//! and the related recipes that can be opened in turn.
//!
//! ```text
//! ┌ Apple Pie ─────────────────── 05.03.2021 ┐
//! │ Difficulty ★★★☆☆                          │
//! │ [image] https://…/pie-1.jpg      ● ○ ○    │
//! │ Description…                              │
//! │ Instructions…                             │
//! ├ Related ──────────────────────────────────┤
//! │ › Apple Tart                              │
//! └───────────────────────────────────────────┘
//! ```
//!
//! Terminals can't show the pictures, so an image is drawn as its URL, or as
//! the placeholder glyph when the recipe has none.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::coordinator::CoordinatorId;
use crate::core::details::DetailsViewModel;
use crate::core::recipe::Resource;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Terminal rendering of an icon resource.
pub fn glyph(resource: Resource) -> &'static str {
    match resource {
        Resource::Placeholder => "▨",
        Resource::DifficultyFilled => "★",
        Resource::DifficultyEmpty => "☆",
    }
}

/// Persistent state for the top details screen.
#[derive(Default)]
pub struct RecipeDetailsState {
    pub page: usize,
    pub related: ListState,
    images: usize,
    related_ids: Vec<String>,
    bound: Option<CoordinatorId>,
}

/// Events emitted by a details screen.
#[derive(Debug, PartialEq, Eq)]
pub enum RecipeDetailsEvent {
    OpenRelated(String),
}

impl RecipeDetailsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets paging when a different details screen comes on top and keeps
    /// the indices inside the loaded content.
    pub fn sync(&mut self, owner: CoordinatorId, view_model: &DetailsViewModel) {
        if self.bound != Some(owner) {
            *self = Self {
                bound: Some(owner),
                ..Self::default()
            };
        }

        let images = view_model.image_cells().len();
        let related = view_model.related_cells().len();
        self.images = images;
        self.page = self.page.min(images.saturating_sub(1));
        let selected = match self.related.selected() {
            _ if related == 0 => None,
            Some(i) => Some(i.min(related - 1)),
            None => Some(0),
        };
        self.related.select(selected);
        self.related_ids.clear();
        self.related_ids.extend(
            view_model
                .related_cells()
                .iter()
                .map(|cell| cell.data().id.clone()),
        );
    }
}

impl EventHandler for RecipeDetailsState {
    type Event = RecipeDetailsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RecipeDetailsEvent> {
        match event {
            TuiEvent::PagePrev => {
                self.page = self.page.saturating_sub(1);
                None
            }
            TuiEvent::PageNext => {
                if self.page + 1 < self.images {
                    self.page += 1;
                }
                None
            }
            TuiEvent::CursorUp => {
                self.related.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                if let Some(i) = self.related.selected()
                    && i + 1 < self.related_ids.len()
                {
                    self.related.select(Some(i + 1));
                }
                None
            }
            TuiEvent::Submit => self
                .related
                .selected()
                .and_then(|i| self.related_ids.get(i))
                .map(|id| RecipeDetailsEvent::OpenRelated(id.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for a details screen.
pub struct RecipeDetails<'a> {
    state: &'a mut RecipeDetailsState,
    view_model: &'a DetailsViewModel,
}

impl<'a> RecipeDetails<'a> {
    pub fn new(state: &'a mut RecipeDetailsState, view_model: &'a DetailsViewModel) -> Self {
        Self { state, view_model }
    }

    fn image_line(&self) -> Line<'static> {
        let cells = self.view_model.image_cells();
        let mut spans = match cells.get(self.state.page) {
            Some(cell) if !cell.data().is_empty() => vec![
                Span::styled("[image] ", Style::default().fg(Color::DarkGray)),
                Span::raw(cell.data().url().to_string()),
            ],
            _ => vec![Span::styled(
                format!("{} no image", glyph(Resource::Placeholder)),
                Style::default().fg(Color::DarkGray),
            )],
        };

        if self.view_model.shows_page_indicator() {
            let dots = (0..cells.len())
                .map(|i| if i == self.state.page { "●" } else { "○" })
                .collect::<Vec<_>>()
                .join(" ");
            spans.push(Span::raw(format!("   {dots}")));
        }
        Line::from(spans)
    }
}

impl Component for RecipeDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(recipe) = self.view_model.recipe() else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(block, area);
            return;
        };

        let related_height = if self.view_model.shows_related() {
            (recipe.related.len() as u16 + 2).min(8)
        } else {
            0
        };
        let [body_area, related_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(related_height),
        ])
        .areas(area);

        let difficulty: String = recipe.difficulty.icons().into_iter().map(glyph).collect();
        let mut text = Text::from(vec![
            Line::from(vec![
                Span::styled("Difficulty ", Style::default().fg(Color::DarkGray)),
                Span::styled(difficulty, Style::default().fg(Color::Yellow)),
            ]),
            self.image_line(),
            Line::default(),
        ]);
        if !recipe.description.is_empty() {
            text.extend(Text::raw(recipe.description.clone()));
            text.push_line(Line::default());
        }
        text.push_line(Line::styled(
            "Instructions",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        text.extend(Text::raw(recipe.instructions.clone()));

        let body = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", recipe.name))
                    .title(Line::from(format!(" {} ", recipe.last_updated)).right_aligned()),
            );
        frame.render_widget(body, body_area);

        if related_height == 0 {
            return;
        }
        let items: Vec<ListItem> = self
            .view_model
            .related_cells()
            .iter()
            .map(|cell| ListItem::new(cell.data().name.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Related "),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, related_area, &mut self.state.related);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimilarElement;
    use crate::core::coordinator::Screen;
    use crate::test_support::{StubSource, element, settle, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn catalog() -> Arc<StubSource> {
        let mut pie = element("pie", "Apple Pie", 1);
        pie.difficulty = 3;
        pie.images = vec!["https://img/pie-1.jpg".into(), "https://img/pie-2.jpg".into()];
        pie.similar = vec![
            SimilarElement {
                uuid: "tart".into(),
                name: "Apple Tart".into(),
                image: String::new(),
            },
            SimilarElement {
                uuid: "bread".into(),
                name: "Banana Bread".into(),
                image: String::new(),
            },
        ];
        Arc::new(StubSource::new(vec![pie]))
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(Resource::DifficultyFilled), "★");
        assert_eq!(glyph(Resource::DifficultyEmpty), "☆");
    }

    #[tokio::test]
    async fn test_paging_related_selection_and_render() {
        let (mut app, mut rx) = test_app(catalog());
        app.start();
        settle(&mut app, &mut rx).await;
        assert!(app.select("pie"));
        settle(&mut app, &mut rx).await;

        let owner = app.navigation().top().unwrap().coordinator;
        let Some(Screen::Details(vm)) = app.top_screen() else {
            panic!("details screen is not on top");
        };
        let mut state = RecipeDetailsState::new();
        state.sync(owner, vm);

        state.handle_event(&TuiEvent::PageNext);
        state.handle_event(&TuiEvent::PageNext);
        assert_eq!(state.page, 1);

        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(RecipeDetailsEvent::OpenRelated("bread".to_string()))
        );

        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| RecipeDetails::new(&mut state, vm).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Apple Pie"));
        assert!(text.contains("★★★☆☆"));
        assert!(text.contains("pie-2.jpg"));
        assert!(text.contains("○ ●"));
        assert!(text.contains("Banana Bread"));
    }
}
