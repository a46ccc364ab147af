//! Help overlay.
//!
//! Drawn inside the same `terminal.draw()` closure as the panels: `Clear`
//! erases the area first, then a bordered `Paragraph` lists the keys.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay centred on top of the panels.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(70));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  ↑/↓ scroll, F1 or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active))
        .style(Style::default().bg(theme.review_bg).fg(theme.review_fg));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = |s: &'static str| {
        Line::styled(s, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    };
    Text::from(vec![
        heading("Review"),
        Line::from("  Ctrl-R          Request a review of the current code"),
        Line::from("  Ctrl-T          Switch between light and dark mode"),
        Line::from(""),
        heading("Editor"),
        Line::from("  Arrows          Move the cursor"),
        Line::from("  Home / End      Start / end of line"),
        Line::from("  PgUp / PgDn     Move one page"),
        Line::from("  Enter / Tab     New line (keeps indent) / two spaces"),
        Line::from("  Bksp / Del      Delete before / after the cursor"),
        Line::from("  Paste           Inserted as-is"),
        Line::from(""),
        heading("Review panel"),
        Line::from("  ↑ / ↓           Scroll one line"),
        Line::from("  PgUp / PgDn     Scroll one page"),
        Line::from("  Home            Back to the top"),
        Line::from(""),
        heading("General"),
        Line::from("  Ctrl-W          Switch focus between editor and review"),
        Line::from("  Mouse           Click to focus, wheel to scroll"),
        Line::from("  Esc             Dismiss a notice or this overlay"),
        Line::from("  F1              Open / close this overlay"),
        Line::from("  Ctrl-Q          Quit"),
    ])
}
