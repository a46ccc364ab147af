//! Keybinding dispatcher for critique.
//!
//! Translates crossterm key, paste, and mouse events into `AppState` and
//! `SessionStore` mutations, and returns a `KeyAction` telling the event loop
//! what else to do. Dispatch branches first on `state.mode` so the notice
//! popup, the help overlay, and normal editing each have their own handler.

use critique_core::{Assessor, SessionStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};
use crate::editor::{Edit, Motion, apply_edit, apply_motion};

/// Lines moved per mouse-wheel notch.
const WHEEL_STEP: u16 = 3;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
    /// Flip the theme and persist the new preference.
    ToggleTheme,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key<A: Assessor>(
    key: KeyEvent,
    state: &mut AppState,
    session: &mut SessionStore<A>,
) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return KeyAction::Quit;
    }

    match state.mode {
        Mode::Notice => handle_notice(key, state, session),
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state, session),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal<A: Assessor>(
    key: KeyEvent,
    state: &mut AppState,
    session: &mut SessionStore<A>,
) -> KeyAction {
    if let Some(action) = handle_global_key(key, state, session) {
        return action;
    }
    match state.focus {
        PanelFocus::Editor => handle_editor_key(key, state, session),
        PanelFocus::Review => handle_review_key(key, state),
    }
    KeyAction::Continue
}

/// Keys that work the same whichever panel has focus.
fn handle_global_key<A: Assessor>(
    key: KeyEvent,
    state: &mut AppState,
    session: &mut SessionStore<A>,
) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('r') if ctrl => {
            state.status_message = if session.request_review() {
                None
            } else {
                Some("A review is already in progress".to_owned())
            };
            Some(KeyAction::Continue)
        }
        KeyCode::Char('t') if ctrl => Some(KeyAction::ToggleTheme),
        KeyCode::Char('w') if ctrl => {
            state.focus = state.focus.toggled();
            Some(KeyAction::Continue)
        }
        KeyCode::F(1) => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            Some(KeyAction::Continue)
        }
        KeyCode::Esc => {
            state.status_message = None;
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

fn handle_editor_key<A: Assessor>(key: KeyEvent, state: &mut AppState, session: &mut SessionStore<A>) {
    let page = state.editor_viewport_height as usize;
    let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    let edit = match key.code {
        KeyCode::Char(c) if plain => Some(Edit::Insert(c)),
        KeyCode::Enter => Some(Edit::Newline),
        KeyCode::Tab => Some(Edit::Tab),
        KeyCode::Backspace => Some(Edit::Backspace),
        KeyCode::Delete => Some(Edit::Delete),
        _ => None,
    };
    if let Some(edit) = edit {
        edit_code(state, session, edit);
        return;
    }

    let motion = match key.code {
        KeyCode::Left => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Home => Motion::Home,
        KeyCode::End => Motion::End,
        KeyCode::PageUp => Motion::PageUp(page),
        KeyCode::PageDown => Motion::PageDown(page),
        _ => return,
    };
    apply_motion(session.code(), &mut state.cursor, motion);
}

fn handle_review_key(key: KeyEvent, state: &mut AppState) {
    let page = state.review_viewport_height.max(1);
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_review_down(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_review_up(1),
        KeyCode::PageDown | KeyCode::Char(' ') => state.scroll_review_down(page),
        KeyCode::PageUp => state.scroll_review_up(page),
        KeyCode::Home | KeyCode::Char('g') => state.reset_review_scroll(),
        _ => {}
    }
}

/// Copies the buffer out of the session, edits it, and stores it back.
fn edit_code<A: Assessor>(state: &mut AppState, session: &mut SessionStore<A>, edit: Edit) {
    let mut code = session.code().to_owned();
    apply_edit(&mut code, &mut state.cursor, edit);
    session.set_code(code);
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// Any of Esc, Enter, or Space dismisses the notice. The next queued notice,
/// if there is one, takes its place.
fn handle_notice<A: Assessor>(
    key: KeyEvent,
    state: &mut AppState,
    session: &mut SessionStore<A>,
) -> KeyAction {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
        state.dismiss_notice();
        if let Some(next) = session.take_notice() {
            state.show_notice(next.message);
        }
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Paste and mouse
// ---------------------------------------------------------------------------

/// Inserts bracketed-paste text into the editor. Ignored unless the editor
/// has focus in normal mode.
pub fn handle_paste<A: Assessor>(text: String, state: &mut AppState, session: &mut SessionStore<A>) {
    if state.mode == Mode::Normal && state.focus == PanelFocus::Editor {
        edit_code(state, session, Edit::Paste(text));
    }
}

/// Left click focuses the panel under the pointer; the wheel scrolls the
/// focused panel (or the help overlay when it is open).
pub fn handle_mouse<A: Assessor>(
    mouse: MouseEvent,
    state: &mut AppState,
    session: &SessionStore<A>,
) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if state.mode == Mode::Normal => {
            let pos = Position { x: mouse.column, y: mouse.row };
            let [editor, review] = state.panel_rects;
            if editor.contains(pos) {
                state.focus = PanelFocus::Editor;
            } else if review.contains(pos) {
                state.focus = PanelFocus::Review;
            }
        }
        MouseEventKind::ScrollUp => scroll_by_wheel(state, session, false),
        MouseEventKind::ScrollDown => scroll_by_wheel(state, session, true),
        _ => {}
    }
}

fn scroll_by_wheel<A: Assessor>(state: &mut AppState, session: &SessionStore<A>, down: bool) {
    match (state.mode, state.focus) {
        (Mode::HelpOverlay, _) => {
            state.help_scroll = if down {
                state.help_scroll.saturating_add(WHEEL_STEP)
            } else {
                state.help_scroll.saturating_sub(WHEEL_STEP)
            };
        }
        (Mode::Normal, PanelFocus::Review) => {
            if down {
                state.scroll_review_down(WHEEL_STEP);
            } else {
                state.scroll_review_up(WHEEL_STEP);
            }
        }
        (Mode::Normal, PanelFocus::Editor) => {
            let motion = if down {
                Motion::PageDown(WHEEL_STEP as usize)
            } else {
                Motion::PageUp(WHEEL_STEP as usize)
            };
            apply_motion(session.code(), &mut state.cursor, motion);
        }
        (Mode::Notice, _) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critique_core::{RequestState, ReviewError, ReviewResult};
    use tokio::sync::mpsc;

    /// Never answers, so a requested review stays pending.
    struct SilentAssessor;

    impl Assessor for SilentAssessor {
        async fn submit(&self, _code: String) -> Result<ReviewResult, ReviewError> {
            std::future::pending().await
        }
    }

    fn session() -> SessionStore<SilentAssessor> {
        let (tx, _rx) = mpsc::unbounded_channel();
        SessionStore::new(SilentAssessor, tx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_edits_the_session_buffer() {
        let mut state = AppState::default();
        let mut session = session();
        session.set_code("");
        for c in "let".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state, &mut session);
        }
        handle_key(key(KeyCode::Backspace), &mut state, &mut session);
        assert_eq!(session.code(), "le");
        assert_eq!(state.cursor.col, 2);
    }

    #[test]
    fn typing_is_ignored_while_review_has_focus() {
        let mut state = AppState::default();
        let mut session = session();
        handle_key(ctrl('w'), &mut state, &mut session);
        assert_eq!(state.focus, PanelFocus::Review);

        let before = session.code().to_owned();
        handle_key(key(KeyCode::Char('x')), &mut state, &mut session);
        handle_key(key(KeyCode::Down), &mut state, &mut session);
        assert_eq!(session.code(), before);
        assert_eq!(state.review_scroll, 1);
    }

    #[tokio::test]
    async fn second_request_while_pending_sets_status_message() {
        let mut state = AppState::default();
        let mut session = session();
        handle_key(ctrl('r'), &mut state, &mut session);
        assert_eq!(session.current_state(), RequestState::Pending);
        assert!(state.status_message.is_none());

        handle_key(ctrl('r'), &mut state, &mut session);
        assert!(state.status_message.is_some());
    }

    #[tokio::test]
    async fn editing_stays_allowed_while_pending() {
        let mut state = AppState::default();
        let mut session = session();
        handle_key(ctrl('r'), &mut state, &mut session);
        handle_paste("// hi\n".to_owned(), &mut state, &mut session);
        assert!(session.code().starts_with("// hi\n"));
        assert_eq!(session.current_state(), RequestState::Pending);
    }

    #[test]
    fn control_keys_return_actions() {
        let mut state = AppState::default();
        let mut session = session();
        assert_eq!(handle_key(ctrl('t'), &mut state, &mut session), KeyAction::ToggleTheme);
        assert_eq!(handle_key(ctrl('q'), &mut state, &mut session), KeyAction::Quit);
    }

    #[test]
    fn notice_swallows_keys_until_dismissed() {
        let mut state = AppState::default();
        let mut session = session();
        state.show_notice("Failed to generate review.".to_owned());
        let before = session.code().to_owned();

        handle_key(key(KeyCode::Char('x')), &mut state, &mut session);
        assert_eq!(session.code(), before);
        assert_eq!(state.mode, Mode::Notice);

        handle_key(key(KeyCode::Esc), &mut state, &mut session);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn help_overlay_opens_and_closes() {
        let mut state = AppState::default();
        let mut session = session();
        handle_key(key(KeyCode::F(1)), &mut state, &mut session);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(key(KeyCode::Down), &mut state, &mut session);
        assert_eq!(state.help_scroll, 1);
        handle_key(key(KeyCode::Esc), &mut state, &mut session);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn click_focuses_panel_under_pointer() {
        let mut state = AppState::default();
        let session = session();
        state.panel_rects = [
            ratatui::layout::Rect::new(0, 0, 50, 20),
            ratatui::layout::Rect::new(50, 0, 50, 20),
        ];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 70,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click, &mut state, &session);
        assert_eq!(state.focus, PanelFocus::Review);
    }

    #[test]
    fn wheel_scrolls_the_focused_review_panel() {
        let mut state = AppState::default();
        let session = session();
        state.focus = PanelFocus::Review;
        let wheel = |kind| MouseEvent { kind, column: 0, row: 0, modifiers: KeyModifiers::NONE };

        handle_mouse(wheel(MouseEventKind::ScrollDown), &mut state, &session);
        handle_mouse(wheel(MouseEventKind::ScrollDown), &mut state, &session);
        handle_mouse(wheel(MouseEventKind::ScrollUp), &mut state, &session);
        assert_eq!(state.review_scroll, WHEEL_STEP);
    }
}
