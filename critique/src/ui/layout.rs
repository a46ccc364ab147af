//! Responsive 2-panel layout for critique.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()`.
//!
//! At `>= 100` columns the editor and the review sit side by side (50 / 50).
//! Narrower terminals stack them, editor on top. `Spacing::Overlap(1)` plus
//! `MergeStrategy::Fuzzy` lets adjacent borders share one cell.

use critique_core::RequestState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;

/// Terminal width at which the panels switch from stacked to side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Returns `[editor, review, status_bar]` rects for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    let area = frame.area();

    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let split = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
    } else {
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)])
    }
    .spacing(Spacing::Overlap(1));

    let [editor, review] = main_area.layout(&split);
    [editor, review, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered panel `Block` filled with `bg`.
///
/// The focused panel gets a thick border in `border_active`. `Fuzzy` merging
/// is required because `Exact` draws wrong junctions between thick and plain
/// borders.
pub fn panel_block<'a>(
    title: impl Into<Line<'a>>,
    is_focused: bool,
    bg: ratatui::style::Color,
    theme: &Theme,
) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .style(Style::default().bg(bg))
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: focus, request state, message, and key hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    request: RequestState,
    theme: &Theme,
) {
    let focus_text = match state.focus {
        PanelFocus::Editor => " EDIT ",
        PanelFocus::Review => " REVIEW ",
    };

    let request_text = match request {
        RequestState::Pending => format!(" {} {} ", state.spinner(), request.label()),
        other => format!(" {} ", other.label()),
    };
    let request_fg = match request {
        RequestState::Failed => theme.notice_border,
        _ => theme.status_bar_fg,
    };

    let mut spans = vec![
        Span::styled(
            focus_text,
            Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD),
        ),
        Span::styled(request_text, Style::default().fg(request_fg)),
    ];
    if let Some(message) = &state.status_message {
        spans.push(Span::styled(format!(" {message} "), Style::default().fg(theme.muted)));
    }
    spans.push(Span::styled(
        format!(" ^R review  ^T {}  ^W focus  F1 help  ^Q quit ", theme.toggle_label()),
        Style::default().fg(theme.muted),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
