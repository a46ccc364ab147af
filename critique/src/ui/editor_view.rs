//! Code editor panel.
//!
//! Highlighted lines come from the cache in `AppState`; only the rows inside
//! the viewport, `lines[editor_scroll..editor_scroll + height]`, are turned
//! into list items, behind a right-aligned line-number gutter.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::editor::{clamp, line_count, scroll_to_cursor};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the editor panel and places the terminal cursor when it has focus.
///
/// Adjusts `state.editor_scroll` so the cursor row stays visible.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    code: &str,
    language: &str,
    theme: &Theme,
) {
    let is_focused = state.focus == PanelFocus::Editor;
    let title = format!("Code ({language})");
    let block = panel_block(title, is_focused, theme.editor_bg, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    state.cursor = clamp(code, state.cursor);
    let height = inner.height as usize;
    state.editor_scroll = scroll_to_cursor(state.editor_scroll, state.cursor.row, height);

    let total = line_count(code);
    let gutter_width = total.to_string().len();
    let gutter_style = Style::default().fg(theme.gutter);
    let text_style = Style::default().fg(theme.editor_fg);

    let scroll = state.editor_scroll;
    let items: Vec<ListItem> = state
        .editor_lines
        .lines(code, language, theme.syntax_theme)
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(row, line)| {
            let mut spans = vec![Span::styled(
                format!("{:>gutter_width$} ", row + 1),
                gutter_style,
            )];
            spans.extend(line.spans.iter().cloned());
            ListItem::new(Line::from(spans).style(text_style))
        })
        .collect();

    frame.render_widget(List::new(items), inner);

    if is_focused && state.mode == Mode::Normal {
        let x = inner.x as usize + gutter_width + 1 + state.cursor.col;
        let y = inner.y as usize + state.cursor.row - state.editor_scroll;
        // Long lines are clipped, so a cursor past the right edge is hidden.
        if x < (inner.x + inner.width) as usize {
            frame.set_cursor_position(Position { x: x as u16, y: y as u16 });
        }
    }
}
