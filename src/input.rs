//! Translation of terminal events into session actions.
//!
//! The mapping is stateless: every event is interpreted on its own.

use crate::classify::BucketId;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// High-level actions consumed by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Show the given bucket
    Select(BucketId),
    /// End the session
    Quit,
    /// The terminal was resized; resynchronize geometry
    Resync,
    NoAction,
}

/// Map a raw terminal event to an action.
pub fn map_event(event: &Event) -> InputAction {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => InputAction::Resync,
        _ => InputAction::NoAction,
    }
}

/// Map a key event to an action. Only presses count.
pub fn map_key(key: &KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::NoAction;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return InputAction::NoAction;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char(ch) => BucketId::from_digit(ch)
            .map(InputAction::Select)
            .unwrap_or(InputAction::NoAction),
        _ => InputAction::NoAction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn digits_select_buckets() {
        assert_eq!(
            map_event(&key(KeyCode::Char('1'))),
            InputAction::Select(BucketId::All)
        );
        assert_eq!(
            map_event(&key(KeyCode::Char('2'))),
            InputAction::Select(BucketId::Error)
        );
        assert_eq!(
            map_event(&key(KeyCode::Char('3'))),
            InputAction::Select(BucketId::Info)
        );
        assert_eq!(
            map_event(&key(KeyCode::Char('4'))),
            InputAction::Select(BucketId::Warn)
        );
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            assert_eq!(map_event(&key(code)), InputAction::Quit, "{code:?}");
        }
    }

    #[test]
    fn resize_requests_resync() {
        assert_eq!(map_event(&Event::Resize(120, 40)), InputAction::Resync);
    }

    #[test]
    fn other_events_are_ignored() {
        assert_eq!(map_event(&key(KeyCode::Char('5'))), InputAction::NoAction);
        assert_eq!(map_event(&key(KeyCode::Char('Q'))), InputAction::NoAction);
        assert_eq!(map_event(&key(KeyCode::Up)), InputAction::NoAction);
        assert_eq!(map_event(&Event::FocusGained), InputAction::NoAction);
        assert_eq!(
            map_event(&Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })),
            InputAction::NoAction
        );
    }

    #[test]
    fn releases_and_chords_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(&release), InputAction::NoAction);

        let ctrl_two = Event::Key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_two), InputAction::NoAction);
    }

    #[test]
    fn shift_does_not_block_quit() {
        let shifted = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert_eq!(map_event(&shifted), InputAction::Quit);
    }
}
