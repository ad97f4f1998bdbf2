use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    StartGoto,
    StartAdd,
    StartEdit,
    Delete,
    SelectNext,
    SelectPrev,
    CancelAnimation,
    ShowHelp,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::Prompt(_) => handle_prompt_mode(key),
        // Any key leaves help
        Mode::Help => Action::ExitMode,
        Mode::Normal => keymap
            .lookup(&KeyBinding::from(key))
            .cloned()
            .unwrap_or(Action::None),
    }
}

/// Keys while a text prompt is open
fn handle_prompt_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PromptKind;
    use crossterm::event::KeyModifiers;
    use recycler_core::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let app = App::new(AppConfig::default()).unwrap();
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app, &keymap), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char(':')), &app, &keymap), Action::StartGoto);
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), &app, &keymap), Action::None);
    }

    #[test]
    fn test_prompt_mode_captures_text() {
        let mut app = App::new(AppConfig::default()).unwrap();
        app.mode = Mode::Prompt(PromptKind::Goto);
        let keymap = Keymap::default();
        // 'q' is text here, not quit
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app, &keymap), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app, &keymap), Action::Cancel);
    }

    #[test]
    fn test_help_mode_any_key_exits() {
        let mut app = App::new(AppConfig::default()).unwrap();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app, &keymap), Action::ExitMode);
    }
}
