//! Failure notice popup, shown after a review attempt fails.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

pub fn render_notice(frame: &mut Frame, message: &str, theme: &Theme) {
    let width = (frame.area().width.saturating_sub(4)).min(60);
    let area = frame
        .area()
        .centered(Constraint::Length(width), Constraint::Length(7));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(Line::styled(
            " Review failed ",
            Style::default().fg(theme.notice_border).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Esc to dismiss ").right_aligned())
        .border_style(Style::default().fg(theme.notice_border))
        .style(Style::default().bg(theme.review_bg).fg(theme.review_fg));

    frame.render_widget(
        Paragraph::new(message.to_owned()).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
