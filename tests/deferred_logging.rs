//! Warnings raised during a session must not reach stderr until the terminal is restored.
//!
//! Installs a process-wide logger, so this file holds a single test.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::time::{timeout, Duration};

use logsift::render::{EventSource, Screen};
use logsift::{classify, run_session, Bucket, LogsiftError, Session};

/// Terminal operations and log records, in the order they happened
static TRACE: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn trace(entry: String) {
    TRACE.lock().unwrap().push(entry);
}

struct TraceLogger;

impl Log for TraceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            trace(format!("log {}: {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: TraceLogger = TraceLogger;

struct BrokenScreen;

impl Screen for BrokenScreen {
    fn initialize(&mut self) -> logsift::Result<()> {
        Ok(())
    }

    fn draw(&mut self, _bucket: &Bucket) -> logsift::Result<()> {
        trace("draw".to_string());
        Err(LogsiftError::render("broken pipe"))
    }

    fn resync(&mut self) -> logsift::Result<()> {
        trace("resync".to_string());
        Err(LogsiftError::render("resize failed"))
    }

    fn finalize(&mut self) -> logsift::Result<()> {
        trace("finalize".to_string());
        Ok(())
    }
}

/// Plays its events, then fails like a terminal that went away
struct DyingEvents(Vec<Event>);

impl EventSource for DyingEvents {
    fn next_event(&mut self) -> logsift::Result<Event> {
        if self.0.is_empty() {
            return Err(LogsiftError::input("device unplugged"));
        }
        Ok(self.0.remove(0))
    }
}

#[tokio::test]
async fn session_warnings_are_logged_after_finalize() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let session = Session::new("app.log", classify(["ERROR a\n", "INFO b\n"]));
    let key = |ch| Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
    let events = DyingEvents(vec![key('2'), Event::Resize(80, 24), key('3')]);

    let report = timeout(
        Duration::from_millis(2000),
        run_session(session, BrokenScreen, events),
    )
    .await
    .expect("session did not finish")
    .expect("render failures are not fatal");

    let trace = TRACE.lock().unwrap().clone();
    let finalize_at = trace
        .iter()
        .position(|entry| entry == "finalize")
        .expect("screen was finalized");
    let first_log = trace
        .iter()
        .position(|entry| entry.starts_with("log "))
        .expect("failures were logged");

    assert!(first_log > finalize_at, "{trace:#?}");
    assert!(trace[finalize_at + 1..]
        .iter()
        .all(|entry| entry.starts_with("log ")));
    assert!(trace.iter().any(|entry| entry.contains("resize failed")));
    assert!(trace.iter().any(|entry| entry.contains("device unplugged")));
    assert!(trace
        .iter()
        .any(|entry| entry.contains("input closed before quit")));
    assert_eq!(
        trace.iter().filter(|entry| entry.starts_with("log ")).count(),
        report.diagnostics.len() + 1
    );
}
