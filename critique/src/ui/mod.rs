//! UI rendering for critique.
//!
//! `render()` is the single entry point, called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the two
//! panels in `editor_view.rs` and `review_view.rs`, and the overlays in
//! `help.rs` and `notice.rs`.

mod editor_view;
mod help;
pub mod keybindings;
mod layout;
mod notice;
mod review_view;

use critique_core::{Assessor, SessionStore};
use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame from the UI state and the session snapshot.
///
/// Viewport heights and panel rects are written back into `state` so that
/// page-sized scrolls and mouse clicks on the *next* event use this frame's
/// geometry.
pub fn render<A: Assessor>(
    frame: &mut Frame,
    state: &mut AppState,
    session: &SessionStore<A>,
    theme: &Theme,
    language: &str,
) {
    let [editor, review, status_bar] = compute_layout(frame);

    state.panel_rects = [editor, review];
    state.editor_viewport_height = inner_rect(editor).height;

    let request = session.current_state();

    editor_view::render_editor(frame, editor, state, session.code(), language, theme);
    review_view::render_review(frame, review, state, session.current_result(), request, theme);
    render_status_bar(frame, status_bar, state, request, theme);

    // Overlays go last so they sit on top of the panels.
    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::Notice => {
            if let Some(message) = &state.notice {
                notice::render_notice(frame, message, theme);
            }
        }
        Mode::Normal => {}
    }
}
