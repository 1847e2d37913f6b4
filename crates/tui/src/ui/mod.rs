pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::Store;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, ChartKind, Screen, Tab};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::{SLICE_COLORS, Theme};

pub fn render(frame: &mut Frame<'_>, state: &AppState, store: &Store) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Tracker => render_shell(frame, area, state, store),
    }
    components::notice::render(frame, area, state.notice.as_ref());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // info bar
            Constraint::Length(2), // tabs
            Constraint::Min(0),
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, store, &theme);
    components::tabs::render_tabs(frame, layout[1], state.tab, &theme);

    let content = layout[2];
    match state.tab {
        Tab::Dashboard => screens::dashboard::render(frame, content, state, store),
        Tab::Transactions => screens::transactions::render(frame, content, state, store),
        Tab::Categories => screens::categories::render(frame, content, state, store),
        Tab::Budgets => screens::budgets::render(frame, content, state, store),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let user = if state.login.username.is_empty() {
        "-"
    } else {
        state.login.username.as_str()
    };
    let cursor = store.cursor();

    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Categories", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", store.categories().len())),
        Span::styled("Transactions", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {} (page {})", cursor.total_count, cursor.page)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let separator = || Span::styled("  │  ", Style::default().fg(theme.border));
    let mut parts = Vec::new();

    if !state.is_editing() {
        parts.extend(components::tabs::tab_shortcuts(theme));
        parts.push(separator());
    }

    parts.extend(context_hints(state, theme));

    if !state.is_editing() {
        parts.push(separator());
        parts.extend(hints(
            &[("r", "refresh"), ("L", "logout"), ("q", "quit")],
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Hints for the active tab and mode.
fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.is_editing() {
        return hints(
            &[
                ("Enter", "save"),
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Esc", "cancel"),
            ],
            theme,
        );
    }

    match state.tab {
        Tab::Dashboard => {
            let other = state.chart.toggle();
            let label = match other {
                ChartKind::Pie => "breakdown",
                ChartKind::Bar => "budget chart",
            };
            hints(&[("v", label)], theme)
        }
        Tab::Transactions => hints(
            &[
                ("a", "add"),
                ("x", "delete"),
                ("p/n", "page"),
                ("j/k", "select"),
            ],
            theme,
        ),
        Tab::Categories => hints(&[("a", "add"), ("x", "delete"), ("j/k", "select")], theme),
        Tab::Budgets => hints(
            &[("Enter", "edit"), ("a", "set"), ("x", "remove"), ("j/k", "select")],
            theme,
        ),
    }
}

fn hints(pairs: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, label)) in pairs.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        let gap = if i + 1 < pairs.len() { "  " } else { "" };
        spans.push(Span::raw(format!(" {label}{gap}")));
    }
    spans
}
