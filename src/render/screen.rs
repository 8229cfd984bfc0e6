//! Screen capability traits
//!
//! The output surface and the input event source are separate traits: the event loop blocks on
//! [`EventSource::next_event`] on its own thread while renders hold the [`Screen`].

use crate::classify::Bucket;
use crate::error::Result;
use ratatui::crossterm::event::Event;

/// Output surface of a full-screen terminal session
pub trait Screen: Send {
    /// Acquire the terminal
    ///
    /// This method should:
    /// - Enter raw mode and the alternate screen
    /// - Hide the cursor and clear the surface
    ///
    /// Failures are reported as `ScreenInitFailure`.
    fn initialize(&mut self) -> Result<()>;

    /// Paint `bucket`, oldest line first, replacing whatever was shown before
    ///
    /// Failures are reported as `RenderFailure`.
    fn draw(&mut self, bucket: &Bucket) -> Result<()>;

    /// Resynchronize internal geometry after a resize
    fn resync(&mut self) -> Result<()>;

    /// Restore the terminal. Must be safe to call more than once.
    fn finalize(&mut self) -> Result<()>;
}

/// Blocking source of terminal events
pub trait EventSource: Send {
    /// Wait, without timeout, for the next event
    fn next_event(&mut self) -> Result<Event>;
}
