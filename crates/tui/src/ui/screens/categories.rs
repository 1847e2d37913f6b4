use engine::Store;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use engine::api_types::category::CategoryKind;

use crate::{
    app::{AppState, Focus, state::CategoryField},
    ui::{
        components::{card::Card, form},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();
    let editing = state.categories.focus == Focus::Form;
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if editing {
            [Constraint::Percentage(55), Constraint::Percentage(45)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        })
        .split(area);

    render_list(frame, layout[0], state, store, &theme);
    if editing {
        render_form(frame, layout[1], state, &theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let card = Card::new("Categories", theme).focused(!state.is_editing());
    if store.categories().is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No categories yet. Press a to add one.",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let items: Vec<ListItem> = store
        .categories()
        .iter()
        .map(|category| {
            let kind_style = match category.kind {
                CategoryKind::Income => Style::default().fg(theme.positive),
                CategoryKind::Expense => Style::default().fg(theme.negative),
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24}", category.name)),
                Span::styled(category.kind.as_str(), kind_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.categories.selected));

    let list = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let view = &state.categories;
    let lines = vec![
        form::field_line(
            "Name",
            &view.draft.name,
            view.field == CategoryField::Name,
            theme,
        ),
        form::choice_line(
            "Kind",
            view.draft.kind.as_str(),
            view.field == CategoryField::Kind,
            theme,
        ),
        Line::default(),
        Line::from(Span::styled(
            "Deleting a category also removes its transactions and budget.",
            Style::default().fg(theme.dim),
        )),
        form::form_hints(theme),
    ];

    Card::new("New Category", theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines));
}
