use engine::{Store, aggregate};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::{AppState, ChartKind},
    ui::{
        components::{
            card::{Card, StatCard},
            charts,
            money::{balance_color, styled_signed_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(recent_height(state.recent_count)),
        ])
        .split(area);

    render_summary(frame, layout[0], state, store, &theme);
    render_chart(frame, layout[1], state, store, &theme);
    render_recent(frame, layout[2], state, store, &theme);
}

/// Rows of the recent-transactions card plus its borders.
fn recent_height(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let summary = aggregate::summarize(store.categories(), store.transactions());
    let symbol = state.currency_symbol.as_str();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    StatCard::new("Income", summary.total_income.format_with(symbol), theme)
        .color(theme.positive)
        .render(frame, cols[0]);
    StatCard::new("Expenses", summary.total_expenses.format_with(symbol), theme)
        .color(theme.negative)
        .render(frame, cols[1]);
    StatCard::new("Balance", summary.balance.format_with(symbol), theme)
        .color(balance_color(summary.balance, theme))
        .render(frame, cols[2]);
}

fn render_chart(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let title = format!("{}  (v to switch)", state.chart.label());
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    match state.chart {
        ChartKind::Pie => {
            let series =
                aggregate::expense_by_category_series(store.categories(), store.transactions());
            charts::render_breakdown(frame, inner, &series, &state.currency_symbol, theme);
        }
        ChartKind::Bar => {
            let series = aggregate::budget_vs_actual_series(
                store.categories(),
                store.transactions(),
                store.budgets(),
            );
            charts::render_budget_chart(frame, inner, &series, theme);
        }
    }
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store, theme: &Theme) {
    let card = Card::new("Recent Transactions", theme);
    let recent = aggregate::recent_transactions(store.transactions(), state.recent_count);
    if recent.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No transactions yet",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let items: Vec<ListItem> = recent
        .into_iter()
        .map(|tx| {
            let kind = aggregate::resolve_category_kind(store.categories(), tx.category_id);
            let category = aggregate::resolve_category_name(store.categories(), tx.category_id);
            ListItem::new(Line::from(vec![
                Span::styled(
                    tx.date.format("%d %b %Y").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<28}", charts::truncate(&tx.description, 27)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<16}", charts::truncate(category, 15)),
                    Style::default().fg(theme.text_muted),
                ),
                styled_signed_amount(tx.amount, kind, &state.currency_symbol, theme),
            ]))
        })
        .collect();

    card.render_with(frame, area, List::new(items));
}
