//! Application orchestration layer
//!
//! [`run_session`] is the interactive event loop for one source. [`run_paths`] drives one session
//! per path, strictly one after another.
//!
//! Inside a session two units of work share the screen: the one-shot initial render of the ALL
//! bucket and the event loop. Both go through a single lock around the session and the screen,
//! so a redraw always runs to completion before the next redraw or selector change, and the
//! screen is finalized only after every redraw has finished.
//!
//! Nothing is logged at warn level or above while the screen is active: stderr shares the
//! terminal with the alternate screen. Problems are collected into a [`SessionReport`] and
//! logged once the terminal has been restored.

use crate::classify::{classify_source, BucketId, Classification};
use crate::error::{LogsiftError, Result};
use crate::input::{map_event, InputAction};
use crate::render::{render, EventSource, Screen};
use crate::session::Session;
use crate::source::LineSource;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// What the event loop should do after handling an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// State guarded by the render lock
struct SharedState<S> {
    session: Session,
    screen: S,
    /// Set once a key has selected a bucket; the initial ALL render must not paint over it
    key_selected: bool,
    /// Non-fatal errors raised while the screen is active
    diagnostics: Vec<LogsiftError>,
}

impl<S: Screen> SharedState<S> {
    fn new(session: Session, screen: S) -> Self {
        Self {
            session,
            screen,
            key_selected: false,
            diagnostics: Vec::new(),
        }
    }

    fn apply(&mut self, action: InputAction) -> Result<LoopControl> {
        match action {
            InputAction::Select(id) => {
                if self.session.select(id)? {
                    log::debug!("switched to {id}");
                }
                self.key_selected = true;
                if let Err(e) = render(&mut self.screen, self.session.active_bucket()) {
                    self.diagnostics.push(e);
                }
                Ok(LoopControl::Continue)
            }
            InputAction::Quit => {
                self.session.quit();
                Ok(LoopControl::Exit)
            }
            InputAction::Resync => {
                if let Err(e) = self.screen.resync() {
                    self.diagnostics.push(e);
                }
                Ok(LoopControl::Continue)
            }
            InputAction::NoAction => Ok(LoopControl::Continue),
        }
    }

    fn render_initial(&mut self) {
        if self.session.is_finalized() {
            log::debug!("session closed before the initial render");
            return;
        }
        if self.key_selected {
            log::debug!("a key selected a bucket before the initial render");
            return;
        }
        if let Err(e) = render(&mut self.screen, self.session.bucket(BucketId::All)) {
            self.diagnostics.push(e);
        }
    }
}

/// What happened during one session, available once its screen has been finalized
#[derive(Debug, Default)]
pub struct SessionReport {
    /// Non-fatal render and input errors, in the order they occurred
    pub diagnostics: Vec<LogsiftError>,
    /// Whether the session ended on a quit key rather than on lost input
    pub quit_by_key: bool,
}

impl SessionReport {
    fn log(&self) {
        for e in &self.diagnostics {
            log::warn!("{e}");
        }
        if !self.quit_by_key {
            log::warn!("input closed before quit; session ended");
        }
    }
}

/// Run the interactive loop for one session until it is finalized.
///
/// `screen` must already be initialized. It is finalized before this function returns, whether
/// the loop ended on a quit key or because the event source went away. Problems seen while the
/// screen was active are logged after it is finalized and returned in the [`SessionReport`].
pub async fn run_session<S, E>(session: Session, screen: S, events: E) -> Result<SessionReport>
where
    S: Screen + 'static,
    E: EventSource + 'static,
{
    log::debug!("starting session for {}", session.source().display());
    let shared = Arc::new(Mutex::new(SharedState::new(session, screen)));

    let initial = {
        let shared = Arc::clone(&shared);
        tokio::task::spawn_blocking(move || shared.lock().render_initial())
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let pump = spawn_input_pump(events, tx);

    let mut outcome = Ok(());
    let mut quit_by_key = false;
    while let Some(action) = rx.recv().await {
        let control = {
            let mut state = shared.lock();
            state.apply(action)
        };
        match control {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => {
                quit_by_key = true;
                break;
            }
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    // Treat lost input as quit
    shared.lock().session.quit();

    let initial_failed = initial.await.err();
    let (finalized, mut diagnostics) = {
        let mut state = shared.lock();
        let finalized = state.screen.finalize();
        (finalized, std::mem::take(&mut state.diagnostics))
    };

    if let Some(e) = initial_failed {
        diagnostics.push(LogsiftError::render(format!("initial render task failed: {e}")));
    }
    match pump.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => diagnostics.push(e),
        Err(e) => diagnostics.push(LogsiftError::input(format!("input task failed: {e}"))),
    }

    let report = SessionReport {
        diagnostics,
        quit_by_key,
    };
    report.log();

    outcome.and(finalized).map(|()| report)
}

/// Forward mapped input actions from a blocking event source to the event loop.
///
/// Stops after forwarding `Quit` or when the loop hangs up. An event source failure ends the
/// pump and is returned through the join handle.
fn spawn_input_pump<E>(mut events: E, tx: UnboundedSender<InputAction>) -> JoinHandle<Result<()>>
where
    E: EventSource + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<()> {
        loop {
            let event = events.next_event()?;

            let action = map_event(&event);
            if action == InputAction::NoAction {
                continue;
            }
            if tx.send(action).is_err() || action == InputAction::Quit {
                return Ok(());
            }
        }
    })
}

/// Outcome of processing every path given on the command line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths that got an interactive session
    pub viewed: Vec<PathBuf>,
    /// Paths skipped because they could not be opened
    pub skipped: Vec<PathBuf>,
}

/// Open one interactive session per path, sequentially.
///
/// `open_terminal` builds the screen and event source for a path. Open failures skip the path,
/// read failures show what was read before them. A screen that cannot be initialized ends the
/// run with `ScreenInitFailure`.
pub async fn run_paths<P, F, S, E>(paths: &[P], mut open_terminal: F) -> Result<RunSummary>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> (S, E),
    S: Screen + 'static,
    E: EventSource + 'static,
{
    let mut summary = RunSummary::default();

    for path in paths {
        let path = path.as_ref();
        let source = match LineSource::open(path) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("{e}; skipping");
                summary.skipped.push(path.to_path_buf());
                continue;
            }
        };

        let Classification { buckets, read_error } = classify_source(source);
        if let Some(e) = read_error {
            log::warn!("{e}; showing the {} lines read so far", buckets.all.len());
        }

        let (mut screen, events) = open_terminal(path);
        screen.initialize()?;

        let session = Session::new(path, buckets);
        match run_session(session, screen, events).await {
            Ok(_) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("{e}"),
        }
        summary.viewed.push(path.to_path_buf());
    }

    Ok(summary)
}
