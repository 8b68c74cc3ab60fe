use crate::api::RecipeError;
use crate::core::coordinator::{App, Screen, ScreenKind};
use crate::core::load::LoadState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{RecipeDetails, RecipeList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LIST_HELP: &str = " Enter Open  Tab Scope  Ctrl+S Sort  Ctrl+R Reload  Ctrl+C Quit ";
const DETAILS_HELP: &str = " Enter Open related  ←/→ Images  Esc Back  Ctrl+R Reload ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let screen = app.top_screen();
    let state = screen.as_ref().map(load_state);

    let status = match state {
        Some(LoadState::Loading) => format!("Loading {}", SPINNER[spinner_frame % SPINNER.len()]),
        _ => String::new(),
    };
    TitleBar::new(breadcrumb(app), status).render(frame, title_area);

    let help = match &screen {
        Some(Screen::List(_)) => {
            RecipeList::new(&mut tui.list).render(frame, main_area);
            LIST_HELP
        }
        Some(Screen::Details(vm)) => {
            RecipeDetails::new(&mut tui.details, vm).render(frame, main_area);
            DETAILS_HELP
        }
        None => "",
    };
    frame.render_widget(
        Line::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(LoadState::Failed(error)) = state {
        draw_error_view(frame, main_area, error);
    }
}

pub(crate) fn load_state<'a>(screen: &Screen<'a>) -> &'a LoadState {
    match screen {
        Screen::List(vm) => vm.state(),
        Screen::Details(vm) => vm.state(),
    }
}

/// Screen titles root first. A loaded details screen shows its recipe name.
pub fn breadcrumb(app: &App) -> Vec<String> {
    app.navigation()
        .screens()
        .iter()
        .map(|entry| match (&entry.kind, app.screen(entry.coordinator)) {
            (ScreenKind::Details { .. }, Some(Screen::Details(vm))) => vm
                .recipe()
                .map(|recipe| recipe.name.clone())
                .unwrap_or_else(|| entry.title.clone()),
            _ => entry.title.clone(),
        })
        .collect()
}

/// The retry prompt: error title, message and the keys that act on it.
fn draw_error_view(frame: &mut Frame, area: Rect, error: &RecipeError) {
    let popup = centered_rect(60, 7, area);
    frame.render_widget(Clear, popup);

    let body = format!("{error}\n\nCtrl+R Retry   Esc Back");
    let paragraph = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(format!(" {} ", error.title()))
                .title_alignment(Alignment::Center)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(paragraph, popup);
}

/// A `width_percent` wide, `height` tall rect centered in `area`.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(middle);
    center
}
