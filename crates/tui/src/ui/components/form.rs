use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// One `label: value` line of an edit form. The focused field shows a cursor.
pub fn field_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let cursor = if focused { "│" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
    ])
}

/// A field picked with ←/→ rather than typed.
pub fn choice_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    if !focused {
        return field_line(label, value, false, theme);
    }
    let accent = Style::default().fg(theme.accent);
    Line::from(vec![
        Span::styled(format!("{label:<12}"), accent.add_modifier(Modifier::BOLD)),
        Span::styled(format!("◀ {value} ▶"), accent),
    ])
}

/// Key hints shown under a form.
pub fn form_hints(theme: &Theme) -> Line<'static> {
    let key = Style::default().fg(theme.accent);
    Line::from(vec![
        Span::styled("Enter", key),
        Span::raw(" save  "),
        Span::styled("Tab", key),
        Span::raw(" next  "),
        Span::styled("Esc", key),
        Span::raw(" cancel"),
    ])
}
