//! Rendering subsystem.
//!
//! The session core only talks to the [`Screen`] and [`EventSource`] traits. The crossterm-backed
//! implementations live in [`terminal`].

pub mod renderer;
pub mod screen;
pub mod terminal;
pub mod theme;

pub use renderer::render;
pub use screen::{EventSource, Screen};
pub use terminal::{TerminalEvents, TerminalScreen};
pub use theme::ColorTheme;

#[cfg(test)]
pub use screen::tests::MockScreen;
