// Keyboard input handling.
//
// Key presses edit the form locally. Enter on a settled form becomes a
// `UserCommand::Submit` carrying a snapshot of the field values.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use swingcoach_core::protocol::UserCommand;

use crate::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the
/// controller (Submit, Quit). Returns `None` when it was handled locally or
/// ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Release/Repeat on some platforms; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    let form = &mut view_state.form;
    match key_event.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            None
        }
        KeyCode::Right => {
            form.increment();
            None
        }
        KeyCode::Left => {
            form.decrement();
            None
        }
        KeyCode::Backspace => {
            form.backspace();
            None
        }
        KeyCode::Enter => {
            if view_state.is_busy() {
                return None;
            }
            Some(UserCommand::Submit(view_state.form.snapshot()))
        }
        KeyCode::Char(c) => {
            if form.insert_char(c) {
                None
            } else if c == 'q' {
                Some(UserCommand::Quit)
            } else {
                None
            }
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use swingcoach_core::golf::Frequency;
    use swingcoach_core::protocol::UiState;

    use crate::form::Field;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert!(handle_key(key(KeyCode::Char(c)), state).is_none());
        }
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('9'));
        event.kind = KeyEventKind::Release;
        assert!(handle_key(event, &mut state).is_none());
        assert!(state.form.fields.score.is_empty());
    }

    #[test]
    fn ctrl_c_quits_even_in_text_field() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn q_types_into_text_field() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert_eq!(state.form.fields.score, "q");
    }

    #[test]
    fn q_quits_from_selector() {
        let mut state = ViewState::default();
        state.form.focus = Field::Frequency;
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn tab_and_arrows_move_focus() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.form.focus, Field::Frequency);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.form.focus, Field::Age);
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::BackTab), &mut state);
        assert_eq!(state.form.focus, Field::Score);
    }

    #[test]
    fn left_right_change_selector() {
        let mut state = ViewState::default();
        state.form.focus = Field::Frequency;
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.form.fields.frequency, Frequency::LessThanOnce);
        handle_key(key(KeyCode::Right), &mut state);
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.form.fields.frequency, Frequency::ThreeToFour);
    }

    #[test]
    fn enter_submits_snapshot() {
        let mut state = ViewState::default();
        type_str(&mut state, "88");
        state.form.focus = Field::Age;
        type_str(&mut state, "12");

        match handle_key(key(KeyCode::Enter), &mut state) {
            Some(UserCommand::Submit(fields)) => {
                assert_eq!(fields.score, "88");
                assert_eq!(fields.age, "12");
                assert_eq!(fields.familiarity, 5);
            }
            other => panic!("expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn enter_while_loading_is_ignored() {
        let mut state = ViewState::default();
        state.ui_state = UiState::Loading;
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
    }

    #[test]
    fn enter_after_error_submits_again() {
        let mut state = ViewState::default();
        state.ui_state = UiState::Error("earlier".into());
        assert!(matches!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::Submit(_))
        ));
    }

    #[test]
    fn backspace_edits_focused_field() {
        let mut state = ViewState::default();
        type_str(&mut state, "101");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.form.fields.score, "10");
    }
}
