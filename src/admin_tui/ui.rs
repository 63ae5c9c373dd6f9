//! Common UI styles and layout helpers for the admin TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Color::Green)
    }

    pub fn info() -> Style {
        Style::default()
            .fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default()
            .fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default()
            .fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default()
            .fg(Color::Gray)
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cut `text` to at most `width` terminal columns, ending with `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
