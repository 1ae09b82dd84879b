use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the form to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    /// Press the focused checkbox or button.
    Activate,
    CyclePrev,
    CycleNext,
    /// Printable character; typed into a field, or Space on a control.
    Insert(char),
    Backspace,
    RefreshPorts,
    None,
}

pub fn map_key(key: KeyEvent) -> Action {
    // Only handle the initial key press event. Ignore Repeat and Release
    // events so a single physical key press maps to a single action.
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
        KeyCode::Enter => Action::Activate,
        KeyCode::Left => Action::CyclePrev,
        KeyCode::Right => Action::CycleNext,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::F(5) => Action::RefreshPorts,
        KeyCode::Char(c) => Action::Insert(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), Action::FocusNext);
        assert_eq!(map_key(press(KeyCode::Down, KeyModifiers::NONE)), Action::FocusNext);
        assert_eq!(map_key(press(KeyCode::BackTab, KeyModifiers::SHIFT)), Action::FocusPrev);
        assert_eq!(map_key(press(KeyCode::Left, KeyModifiers::NONE)), Action::CyclePrev);
        assert_eq!(map_key(press(KeyCode::F(5), KeyModifiers::NONE)), Action::RefreshPorts);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        // plain 'q' is text, port names may contain it
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Insert('q'));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), Action::None);
    }
}
