//! Terminal screen implementation using ratatui
//!
//! [`TerminalScreen`] paints buckets into the alternate screen with a one-line status bar at the
//! bottom. [`TerminalEvents`] reads crossterm events and is meant to be polled from a blocking
//! thread.

use crate::classify::{severity_of, Bucket, BucketId};
use crate::error::{LogsiftError, Result};
use crate::render::screen::{EventSource, Screen};
use crate::render::theme::ColorTheme;
use ratatui::crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const BUCKET_ORDER: [BucketId; 4] = [
    BucketId::All,
    BucketId::Error,
    BucketId::Info,
    BucketId::Warn,
];

/// Full-screen terminal surface backed by crossterm
pub struct TerminalScreen {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
    title: String,
    /// Last bucket drawn, repainted after a resize
    last: Option<Bucket>,
}

impl TerminalScreen {
    /// Create an uninitialized screen; `title` is shown in the status bar
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            terminal: None,
            theme: ColorTheme::default(),
            title: title.into(),
            last: None,
        }
    }

    fn setup() -> io::Result<CrosstermTerminal> {
        enable_raw_mode()?;
        Self::enter_alternate_screen().map_err(|e| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            e
        })
    }

    fn enter_alternate_screen() -> io::Result<CrosstermTerminal> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(terminal)
    }

    fn paint(&mut self, bucket: &Bucket) -> io::Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "screen is not initialized",
            ));
        };
        let theme = &self.theme;
        let title = self.title.as_str();
        terminal.draw(|frame| draw_frame(frame, theme, title, bucket))?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn initialize(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }
        let terminal = Self::setup().map_err(|e| LogsiftError::screen_init(e.to_string()))?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn draw(&mut self, bucket: &Bucket) -> Result<()> {
        self.paint(bucket)
            .map_err(|e| LogsiftError::render(e.to_string()))?;
        self.last = Some(bucket.clone());
        Ok(())
    }

    fn resync(&mut self) -> Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal
                .autoresize()
                .map_err(|e| LogsiftError::render(e.to_string()))?;
        }
        // autoresize clears the buffers, so put the current frame back
        if let Some(last) = self.last.clone() {
            self.paint(&last)
                .map_err(|e| LogsiftError::render(e.to_string()))?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };
        self.last = None;

        let raw = disable_raw_mode();
        let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = terminal.show_cursor();
        raw.and(screen)
            .and(cursor)
            .map_err(|e| LogsiftError::render(format!("failed to restore terminal: {e}")))
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            log::error!("{e}");
        }
    }
}

fn draw_frame(frame: &mut Frame, theme: &ColorTheme, title: &str, bucket: &Bucket) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());

    draw_content(frame, chunks[0], theme, bucket);
    draw_status_line(frame, chunks[1], theme, title, bucket);
}

/// Shows the newest lines that fit, as a scrolling terminal would.
fn draw_content(frame: &mut Frame, area: Rect, theme: &ColorTheme, bucket: &Bucket) {
    let visible = usize::from(area.height);
    let skip = bucket.len().saturating_sub(visible);

    let lines: Vec<Line> = bucket
        .iter()
        .skip(skip)
        .map(|line| {
            let text = line.trim_end_matches(['\n', '\r']);
            Line::styled(text, theme.line_style(severity_of(line)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_status_line(
    frame: &mut Frame,
    area: Rect,
    theme: &ColorTheme,
    title: &str,
    bucket: &Bucket,
) {
    let mut spans = vec![Span::styled(
        format!(" {title} | {}: {} lines |", bucket.id(), bucket.len()),
        theme.status,
    )];

    for id in BUCKET_ORDER {
        let style = if id == bucket.id() {
            theme.status_active
        } else {
            theme.status
        };
        spans.push(Span::styled(format!(" {} {}", id.digit(), id.label()), style));
    }
    spans.push(Span::styled("  q Quit ", theme.status));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.status), area);
}

/// Blocking crossterm event reader
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl TerminalEvents {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> Result<Event> {
        event::read().map_err(|e| LogsiftError::input(e.to_string()))
    }
}
