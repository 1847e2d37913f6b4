use engine::{
    aggregate::{BudgetComparison, SLICE_LABEL_MIN_PERCENT, SeriesPoint, share_percent},
    api_types::MoneyCents,
};
use ratatui::{
    Frame,
    layout::{Alignment, Direction, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::ui::theme::{SLICE_COLORS, Theme};

/// One slice of the expense breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub name: String,
    pub value: MoneyCents,
    pub share: f64,
    /// `Name: NN%`, only for slices large enough to be labelled.
    pub label: Option<String>,
}

/// Label drawn on a slice, or `None` when its share is too small.
#[must_use]
pub fn slice_label(name: &str, share: f64) -> Option<String> {
    (share > SLICE_LABEL_MIN_PERCENT).then(|| format!("{name}: {share:.0}%"))
}

#[must_use]
pub fn slices(series: &[SeriesPoint]) -> Vec<Slice> {
    let total: MoneyCents = series.iter().map(|point| point.value).sum();
    series
        .iter()
        .map(|point| {
            let share = share_percent(point.value, total);
            Slice {
                name: point.name.clone(),
                value: point.value,
                share,
                label: slice_label(&point.name, share),
            }
        })
        .collect()
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Share-of-total breakdown: one colored bar per slice, with its amount.
/// Unlabelled slices still get a bar and the legend amount.
pub fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    series: &[SeriesPoint],
    symbol: &str,
    theme: &Theme,
) {
    if series.is_empty() {
        render_empty(frame, area, "No expenses to chart yet", theme);
        return;
    }

    let bar_width = (area.width as usize).saturating_sub(40).clamp(10, 30);
    let rows: Vec<Line> = slices(series)
        .iter()
        .enumerate()
        .take(area.height as usize)
        .map(|(i, slice)| {
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];
            let bar = ascii_bar((slice.share * 10.0) as u64, 1000, bar_width);
            let label = slice.label.clone().unwrap_or_default();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{:<16}", truncate(&slice.name, 15)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>12}", slice.value.format_with(symbol)),
                    Style::default().fg(theme.negative),
                ),
                Span::raw("  "),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(format!(" {label}"), Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), area);
}

/// Spent vs budget bars per expense category, values in major units.
pub fn render_budget_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    comparisons: &[BudgetComparison],
    theme: &Theme,
) {
    if comparisons.is_empty() {
        render_empty(frame, area, "No spending or budgets to compare", theme);
        return;
    }

    let legend = Line::from(vec![
        Span::styled("■ Spent  ", Style::default().fg(theme.spent)),
        Span::styled("■ Budget", Style::default().fg(theme.budget)),
    ]);
    frame.render_widget(
        Paragraph::new(legend).alignment(Alignment::Right),
        Rect { height: 1, ..area },
    );
    let chart_area = Rect {
        y: area.y.saturating_add(1),
        height: area.height.saturating_sub(1),
        ..area
    };

    let mut chart = BarChart::default()
        .direction(Direction::Vertical)
        .bar_width(4)
        .bar_gap(0)
        .group_gap(3)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    for item in comparisons {
        let bars = [
            major_bar(item.spent, theme.spent),
            major_bar(item.budget, theme.budget),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate(&item.name, 10)))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, chart_area);
}

fn major_bar(amount: MoneyCents, color: ratatui::style::Color) -> Bar<'static> {
    let major = amount.as_major_f64().max(0.0);
    Bar::default()
        .value(major.round() as u64)
        .text_value(format!("{major:.0}"))
        .style(Style::default().fg(color))
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center),
        area,
    );
}

/// Shortens `s` to `max_chars` characters, ending with `…` when cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: i64, name: &str, major: i64) -> SeriesPoint {
        SeriesPoint {
            category_id: id,
            name: name.to_string(),
            value: MoneyCents::from_major(major),
        }
    }

    #[test]
    fn small_slices_lose_their_label() {
        let series = vec![point(3, "Groceries", 960), point(5, "Snacks", 40)];
        let slices = slices(&series);

        assert_eq!(slices[0].label.as_deref(), Some("Groceries: 96%"));
        assert_eq!(slices[1].share, 4.0);
        assert_eq!(slices[1].label, None);
    }

    #[test]
    fn huge_slices_share_a_saturated_total() {
        let huge = SeriesPoint {
            category_id: 1,
            name: "Rent".to_string(),
            value: MoneyCents::new(i64::MAX - 1),
        };
        let slices = slices(&[huge.clone(), SeriesPoint { category_id: 2, ..huge }]);
        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(|slice| slice.share <= 100.0));
    }

    #[test]
    fn exactly_five_percent_is_unlabelled() {
        assert_eq!(slice_label("Fees", 5.0), None);
        assert_eq!(slice_label("Fees", 5.1).as_deref(), Some("Fees: 5%"));
    }

    #[test]
    fn ascii_bar_handles_empty_max() {
        assert_eq!(ascii_bar(3, 0, 4), "░░░░");
        assert_eq!(ascii_bar(50, 100, 4), "██░░");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Électricité", 5), "Élec…");
    }
}
