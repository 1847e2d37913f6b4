use engine::{
    aggregate::{BudgetProgress, BudgetStatus},
    api_types::{MoneyCents, category::CategoryKind},
};
use ratatui::{
    style::{Color, Style},
    text::Span,
    widgets::Gauge,
};

use crate::ui::theme::Theme;

/// Formats a transaction amount with the sign of its category kind:
/// `+₹50.00` for income, `-₹150.00` for expense.
#[must_use]
pub fn signed_amount(amount: MoneyCents, kind: CategoryKind, symbol: &str) -> String {
    let prefix = match kind {
        CategoryKind::Income => "+",
        CategoryKind::Expense => "-",
    };
    format!("{prefix}{}", amount.abs().format_with(symbol))
}

/// Signed amount colored by kind.
#[must_use]
pub fn styled_signed_amount(
    amount: MoneyCents,
    kind: CategoryKind,
    symbol: &str,
    theme: &Theme,
) -> Span<'static> {
    let color = match kind {
        CategoryKind::Income => theme.positive,
        CategoryKind::Expense => theme.negative,
    };
    Span::styled(signed_amount(amount, kind, symbol), Style::default().fg(color))
}

/// Green when non-negative, red otherwise.
pub fn balance_color(amount: MoneyCents, theme: &Theme) -> Color {
    if amount.is_negative() {
        theme.negative
    } else {
        theme.positive
    }
}

/// Color for a spent percentage: green under 70%, warning under 90%, red above.
pub fn progress_color(percent: f64, theme: &Theme) -> Color {
    if percent < 70.0 {
        theme.positive
    } else if percent < 90.0 {
        theme.warning
    } else {
        theme.negative
    }
}

/// `₹450.00 left` or `₹100.00 over`.
#[must_use]
pub fn remaining_label(progress: &BudgetProgress, symbol: &str) -> String {
    let status = progress.status();
    let amount = match status {
        BudgetStatus::Left => progress.remaining,
        BudgetStatus::Over => progress.remaining.abs(),
    };
    format!("{} {}", amount.format_with(symbol), status.label())
}

/// Gauge of a budget's spent share, capped at 100%.
#[must_use]
pub fn budget_gauge(progress: &BudgetProgress, theme: &Theme) -> Gauge<'static> {
    let shown = progress.display_percent();
    Gauge::default()
        .gauge_style(Style::default().fg(progress_color(progress.percent_spent, theme)))
        .percent(shown.clamp(0.0, 100.0) as u16)
        .label(format!("{:.0}%", progress.percent_spent))
}

/// Text progress bar for table cells, e.g. `████████░░ 80%`.
#[must_use]
pub fn inline_progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{} {percent:.0}%", "█".repeat(filled), "░".repeat(empty))
}
