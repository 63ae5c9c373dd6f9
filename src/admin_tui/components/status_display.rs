//! Notification area: the current message plus a bounded history

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::admin_tui::ui::Styles;

/// Kinds of notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A notification with its kind and time of creation
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status display component
#[derive(Debug, Clone)]
pub struct StatusDisplay {
    pub current: Option<Notice>,
    pub history: Vec<Notice>,
    pub max_history: usize,
    pub show_timestamp: bool,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current: None,
            history: Vec::new(),
            max_history: 100,
            show_timestamp: true,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Replace the current notice, archiving the previous one
    pub fn push(&mut self, notice: Notice) {
        self.archive_current();
        self.current = Some(notice);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, NoticeKind::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, NoticeKind::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, NoticeKind::Error));
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    fn archive_current(&mut self) {
        if let Some(current) = self.current.take() {
            self.history.push(current);
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
    }

    /// Render the status display
    pub fn render(&self, f: &mut Frame, area: Rect, idle_text: &str) {
        let (content, style) = match &self.current {
            Some(notice) => {
                let style = match notice.kind {
                    NoticeKind::Info => Styles::info(),
                    NoticeKind::Success => Styles::success(),
                    NoticeKind::Error => Styles::error(),
                };
                (self.format_notice(notice), style)
            }
            None => (idle_text.to_string(), Styles::inactive()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let paragraph = Paragraph::new(content)
            .style(style)
            .block(block);

        f.render_widget(paragraph, area);
    }

    fn format_notice(&self, notice: &Notice) -> String {
        let prefix = match notice.kind {
            NoticeKind::Info => "ℹ",
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✗",
        };

        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                prefix,
                notice.timestamp.format("%H:%M:%S"),
                notice.message
            )
        } else {
            format!("{} {}", prefix, notice.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new().with_history(2);
        status.info("one");
        status.success("two");
        status.error("three");
        status.info("four");

        assert_eq!(status.current().map(|n| n.message.as_str()), Some("four"));
        let history: Vec<_> = status.history.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(history, vec!["two", "three"]);
    }
}
