use engine::{
    Store,
    aggregate::{self, BudgetRow},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Focus, state::BudgetField},
    ui::{
        components::{
            card::Card,
            charts::truncate,
            form,
            money::{budget_gauge, inline_progress_bar, progress_color, remaining_label},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();
    let rows = aggregate::budget_rows(store.categories(), store.transactions(), store.budgets());
    let editing = state.budgets.focus == Focus::Form;

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if editing {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        })
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(layout[0]);

    render_list(frame, left[0], state, &rows, &theme);
    render_selected_gauge(frame, left[1], state, &rows, &theme);
    if editing {
        render_form(frame, layout[1], state, store, &theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, rows: &[BudgetRow], theme: &Theme) {
    let card = Card::new("Budgets", theme).focused(state.budgets.focus == Focus::Browse);
    if rows.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "Add an expense category to start budgeting.",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let symbol = state.currency_symbol.as_str();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let name = Span::raw(format!("{:<18}", truncate(&row.name, 17)));
            if !row.has_budget() {
                return ListItem::new(Line::from(vec![
                    name,
                    Span::styled(
                        format!(
                            "No budget set  (spent {})",
                            row.progress.spent.format_with(symbol)
                        ),
                        Style::default().fg(theme.dim),
                    ),
                ]));
            }
            let progress = &row.progress;
            let color = progress_color(progress.percent_spent, theme);
            ListItem::new(Line::from(vec![
                name,
                Span::styled(
                    format!(
                        "{:>12} / {:<12}",
                        progress.spent.format_with(symbol),
                        progress.budget.format_with(symbol)
                    ),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    inline_progress_bar(progress.percent_spent, 12),
                    Style::default().fg(color),
                ),
                Span::raw("  "),
                Span::styled(remaining_label(progress, symbol), Style::default().fg(color)),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.budgets.selected));

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

fn render_selected_gauge(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    rows: &[BudgetRow],
    theme: &Theme,
) {
    let Some(row) = rows.get(state.budgets.selected).filter(|row| row.has_budget()) else {
        return;
    };
    let title = format!("{} budget", row.name);
    let card = Card::new(&title, theme);
    card.render_with(frame, area, budget_gauge(&row.progress, theme));
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let view = &state.budgets;
    let category = view
        .draft
        .category_id
        .map(|id| aggregate::resolve_category_name(store.categories(), id).to_string())
        .unwrap_or_else(|| "add an expense category first".to_string());
    let action = match view.draft.category_id.and_then(|id| store.budget_for(id)) {
        Some(_) => "Update Budget",
        None => "Set Budget",
    };

    let lines = vec![
        form::choice_line(
            "Category",
            &category,
            view.field == BudgetField::Category,
            theme,
        ),
        form::field_line(
            "Amount",
            &view.draft.amount,
            view.field == BudgetField::Amount,
            theme,
        ),
        Line::default(),
        form::form_hints(theme),
    ];

    Card::new(action, theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines));
}
