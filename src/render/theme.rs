//! Color theme and styling definitions using ratatui colors
//!
//! Lines are tinted by their severity so that errors stand out even in the ALL view.

use crate::classify::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Lines with no severity marker
    pub normal_text: Style,

    /// ERROR lines
    pub error_text: Style,

    /// WARN lines
    pub warn_text: Style,

    /// INFO lines
    pub info_text: Style,

    /// Status line
    pub status: Style,

    /// Active bucket label inside the status line
    pub status_active: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: Style::default(),
            error_text: Style::default().fg(Color::Red),
            warn_text: Style::default().fg(Color::Yellow),
            info_text: Style::default(),
            status: Style::default().fg(Color::White).bg(Color::Blue),
            status_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl ColorTheme {
    /// Style for a line of the given severity
    pub fn line_style(&self, severity: Option<Severity>) -> Style {
        match severity {
            Some(Severity::Error) => self.error_text,
            Some(Severity::Warn) => self.warn_text,
            Some(Severity::Info) => self.info_text,
            None => self.normal_text,
        }
    }
}
