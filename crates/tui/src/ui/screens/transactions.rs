use engine::{Store, aggregate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{
        AppState, Focus,
        state::{PaginationControls, TransactionField},
    },
    ui::{
        components::{card::Card, charts::truncate, form, money::styled_signed_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();
    let editing = state.transactions.focus == Focus::Form;
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if editing {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        })
        .split(area);

    let list_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(layout[0]);

    render_list(frame, list_area[0], state, store, &theme);
    render_pagination(
        frame,
        list_area[1],
        &PaginationControls::from(store.cursor()),
        &theme,
    );
    if editing {
        render_form(frame, layout[1], state, store, &theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let card = Card::new("Transactions", theme).focused(state.transactions.focus == Focus::Browse);
    if store.transactions().is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No transactions on this page. Press a to add one.",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let categories = store.categories();
    let items: Vec<ListItem> = store
        .transactions()
        .iter()
        .map(|tx| {
            let kind = aggregate::resolve_category_kind(categories, tx.category_id);
            let category = aggregate::resolve_category_name(categories, tx.category_id);
            ListItem::new(Line::from(vec![
                Span::styled(
                    tx.date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw("  "),
                Span::raw(format!("{:<30}", truncate(&tx.description, 29))),
                Span::styled(
                    format!("{:<16}", truncate(category, 15)),
                    Style::default().fg(theme.text_muted),
                ),
                styled_signed_amount(tx.amount, kind, &state.currency_symbol, theme),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.transactions.selected));

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

/// `◀ p Prev  Page 2 · 37 total  n Next ▶`, dimming the unavailable side.
pub fn pagination_line(controls: &PaginationControls, theme: &Theme) -> Line<'static> {
    let side = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        }
    };
    Line::from(vec![
        Span::styled("◀ p Prev", side(controls.prev_enabled)),
        Span::styled(
            format!("  Page {} · {} total  ", controls.page, controls.total_count),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled("n Next ▶", side(controls.next_enabled)),
    ])
}

fn render_pagination(frame: &mut Frame<'_>, area: Rect, controls: &PaginationControls, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(pagination_line(controls, theme)).alignment(Alignment::Center),
        area,
    );
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let view = &state.transactions;
    let draft = &view.draft;
    let category = match draft.category_id {
        Some(id) => {
            let category = store.category(id);
            let name = category.map_or(aggregate::UNKNOWN_CATEGORY, |c| c.name.as_str());
            let kind = category.map_or("", |c| c.kind.as_str());
            format!("{name} ({kind})")
        }
        None => "add a category first".to_string(),
    };

    let lines = vec![
        form::field_line(
            "Description",
            &draft.description,
            view.field == TransactionField::Description,
            theme,
        ),
        form::field_line(
            "Amount",
            &draft.amount,
            view.field == TransactionField::Amount,
            theme,
        ),
        form::choice_line(
            "Category",
            &category,
            view.field == TransactionField::Category,
            theme,
        ),
        form::field_line(
            "Date",
            &draft.date,
            view.field == TransactionField::Date,
            theme,
        ),
        Line::default(),
        form::form_hints(theme),
    ];

    Card::new("New Transaction", theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_shows_page_and_total() {
        let controls = PaginationControls {
            page: 2,
            total_count: 37,
            prev_enabled: true,
            next_enabled: false,
        };
        let theme = Theme::default();
        let line = pagination_line(&controls, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(text, "◀ p Prev  Page 2 · 37 total  n Next ▶");
        assert_eq!(line.spans[2].style.fg, Some(theme.border));
        assert_eq!(line.spans[0].style.fg, Some(theme.accent));
    }
}
