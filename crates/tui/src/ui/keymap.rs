use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ForceQuit,
    Cancel,
    NextField,
    Submit,
    Backspace,
    Up,
    Down,
    Register,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    // Unhandled CONTROL chords must not leak into text fields or shortcuts.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::ForceQuit,
            KeyCode::Char('n') => AppAction::Register,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_force_quits() {
        let action = map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, AppAction::ForceQuit);
    }

    #[test]
    fn unhandled_ctrl_chords_do_nothing() {
        for ch in ['d', 'b', 'x', 'q'] {
            let action = map_key(key(KeyCode::Char(ch), KeyModifiers::CONTROL));
            assert_eq!(action, AppAction::None);
        }
    }

    #[test]
    fn plain_chars_pass_through_as_input() {
        let action = map_key(key(KeyCode::Char('d'), KeyModifiers::NONE));
        assert_eq!(action, AppAction::Input('d'));
    }
}
