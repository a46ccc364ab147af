//! UI state for critique.
//!
//! Everything the screen needs besides the review session itself: mode, focus,
//! editor cursor and scroll, review-panel scroll, cached viewport sizes, and
//! the failure notice currently on screen. The session (code, request state,
//! result) lives in `critique_core::SessionStore` and is passed alongside.

use crate::editor::Cursor;
use crate::highlight::HighlightCache;
use crate::markdown::MarkdownCache;
use ratatui::layout::Rect;

/// Which overlay, if any, is capturing keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys go to the focused panel.
    #[default]
    Normal,
    /// Help overlay is shown above all panels.
    HelpOverlay,
    /// A failure notice popup is waiting to be dismissed.
    Notice,
}

/// Which panel receives editing and scroll keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel: the code editor.
    #[default]
    Editor,
    /// Right panel: score, badges, and narrative.
    Review,
}

impl PanelFocus {
    pub fn toggled(self) -> Self {
        match self {
            PanelFocus::Editor => PanelFocus::Review,
            PanelFocus::Review => PanelFocus::Editor,
        }
    }
}

/// Spinner frames shown in the status bar while a review is pending.
const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Editor cursor, in chars, into the session's code buffer.
    pub cursor: Cursor,
    /// First visible editor row.
    pub editor_scroll: usize,
    /// Vertical scroll of the narrative paragraph.
    pub review_scroll: u16,
    pub help_scroll: u16,

    /// Inner heights cached after each render, used for page-sized moves.
    pub editor_viewport_height: u16,
    pub review_viewport_height: u16,

    /// Outer rects of `[editor, review]` from the last render, for mouse focus.
    pub panel_rects: [Rect; 2],

    /// Failure notice text shown while `mode == Mode::Notice`.
    pub notice: Option<String>,
    /// One-line transient message for the status bar.
    pub status_message: Option<String>,

    /// Advanced on every tick; drives the pending spinner.
    pub tick: usize,

    /// Highlighted editor lines, reused across frames.
    pub editor_lines: HighlightCache,
    /// Rendered review narrative, reused across frames.
    pub narrative_lines: MarkdownCache,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            cursor: Cursor::default(),
            editor_scroll: 0,
            review_scroll: 0,
            help_scroll: 0,
            editor_viewport_height: 0,
            review_viewport_height: 0,
            panel_rects: [Rect::default(); 2],
            notice: None,
            status_message: None,
            tick: 0,
            editor_lines: HighlightCache::default(),
            narrative_lines: MarkdownCache::default(),
        }
    }
}

impl AppState {
    /// Puts a failure notice on screen. A notice already showing is replaced.
    pub fn show_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.mode = Mode::Notice;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.mode = Mode::Normal;
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick % SPINNER.len()]
    }

    pub fn scroll_review_down(&mut self, lines: u16) {
        self.review_scroll = self.review_scroll.saturating_add(lines);
    }

    pub fn scroll_review_up(&mut self, lines: u16) {
        self.review_scroll = self.review_scroll.saturating_sub(lines);
    }

    /// A fresh result starts at the top of its narrative.
    pub fn reset_review_scroll(&mut self) {
        self.review_scroll = 0;
    }
}
