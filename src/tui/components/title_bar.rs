//! # TitleBar Component
//!
//! Top line showing where the user is in the navigation stack plus a
//! transient status (loading spinner, current sort).
//!
//! Stateless: everything arrives as props, so the same bar serves the list
//! and every details screen.
//!
//! ```text
//! Recipes › Apple Pie › Apple Tart | Loading ⠋
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const SEPARATOR: &str = " › ";

pub struct TitleBar {
    /// One entry per screen on the stack, root first.
    pub crumbs: Vec<String>,
    /// Status message (e.g. "Loading ⠋"); empty hides the `|` section.
    pub status_message: String,
}

impl TitleBar {
    pub fn new(crumbs: Vec<String>, status_message: String) -> Self {
        Self {
            crumbs,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let last = self.crumbs.len().saturating_sub(1);
        let mut spans = Vec::new();
        for (i, crumb) in self.crumbs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(SEPARATOR));
            }
            let style = if i == last {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(crumb.clone(), style));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
