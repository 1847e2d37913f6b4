use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{Notice, NoticeLevel},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let theme = Theme::default();
    match notice.level {
        NoticeLevel::Info => render_toast(frame, area, &notice.message, &theme),
        NoticeLevel::Error => render_alert(frame, area, &notice.message, &theme),
    }
}

/// Small box in the bottom-right corner, gone on the next key.
fn render_toast(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let width = (message.chars().count() + 4).min(area.width as usize) as u16;
    let height = 3u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect { x, y, width, height };

    let style = Style::default().fg(theme.positive);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(message.to_string()))
            .style(style)
            .block(block),
        rect,
    );
}

/// Centered modal that holds the keyboard until dismissed.
fn render_alert(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let rect = alert_rect(area, message);
    let block = Block::default()
        .title(Span::styled(
            " Error ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let body = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.text),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}

fn alert_rect(area: Rect, message: &str) -> Rect {
    let max_width = area.width.saturating_sub(4).max(1);
    let wanted = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let width = wanted.clamp(30u16.min(max_width), max_width);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let lines = u16::try_from(message.chars().count().div_ceil(text_width)).unwrap_or(u16::MAX);
    let height = lines.saturating_add(4).min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
