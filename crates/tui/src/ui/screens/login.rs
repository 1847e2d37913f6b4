use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, state::LoginField},
    ui::theme::Theme,
};

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(44, 9, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(Span::styled(
            " Budget Tracker ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // server
            Constraint::Length(1),
            Constraint::Length(1), // username
            Constraint::Length(1), // password
            Constraint::Length(1),
            Constraint::Length(1), // hints
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;
    frame.render_widget(
        Paragraph::new(Span::styled(
            state.base_url.clone(),
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );
    render_input(
        frame,
        rows[2],
        "Username",
        &login.username,
        login.focus == LoginField::Username,
        &theme,
    );
    render_input(
        frame,
        rows[3],
        "Password",
        &mask_password(&login.password),
        login.focus == LoginField::Password,
        &theme,
    );

    let key = Style::default().fg(theme.accent);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Enter", key),
            Span::raw(" sign in  "),
            Span::styled("Tab", key),
            Span::raw(" switch  "),
            Span::styled("Ctrl+C", key),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted)),
        rows[5],
    );

    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y.saturating_add(card_area.height + 1),
            width: card_area.width,
            height: 1,
        };
        if error_area.bottom() <= area.bottom() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    message.clone(),
                    Style::default().fg(theme.error),
                ))
                .alignment(Alignment::Center),
                error_area,
            );
        }
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let line = Line::from(vec![
        Span::styled(format!("{label:<10}"), style),
        Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
