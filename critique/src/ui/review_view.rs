//! Review panel: score card, metric badges, and the markdown narrative.

use critique_core::presentation::{metric_badges, score_color_tier, score_description};
use critique_core::{RequestState, ReviewResult};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Wrap},
};

use crate::app::{AppState, PanelFocus};
use crate::markdown::MarkdownStyle;
use crate::theme::{Theme, tier_color};
use crate::ui::layout::{inner_rect, panel_block};

/// Rows taken by the score card: title, gauge, description.
const CARD_HEIGHT: u16 = 3;

/// Renders the review panel for the current session snapshot.
///
/// Caches the narrative viewport height in `state.review_viewport_height`.
pub fn render_review(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    result: Option<&ReviewResult>,
    request: RequestState,
    theme: &Theme,
) {
    let is_focused = state.focus == PanelFocus::Review;
    let title = if request == RequestState::Pending && result.is_some() {
        "Review (updating…)"
    } else {
        "Review"
    };
    let block = panel_block(title, is_focused, theme.review_bg, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let Some(result) = result else {
        state.review_viewport_height = inner.height;
        let placeholder = if request == RequestState::Pending {
            format!("{} Reviewing your code…", state.spinner())
        } else {
            "No review generated yet. Press Ctrl-R to request one.".to_owned()
        };
        frame.render_widget(
            Paragraph::new(Line::styled(placeholder, Style::default().fg(theme.muted)))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let [card, _, badges, _, narrative] = inner.layout(&Layout::vertical([
        Constraint::Length(CARD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ]));
    state.review_viewport_height = narrative.height;

    render_score_card(frame, card, result.score, theme);
    render_badges(frame, badges, result, theme);

    let md_style = MarkdownStyle {
        text: theme.review_fg,
        accent: theme.accent,
        muted: theme.muted,
        syntax_theme: theme.syntax_theme,
    };
    let scroll = state.review_scroll;
    let lines = state.narrative_lines.lines(&result.review_text, &md_style).to_vec();
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        narrative,
    );
}

fn render_score_card(frame: &mut Frame, area: Rect, score: i64, theme: &Theme) {
    let color = tier_color(score_color_tier(score));
    frame.render_widget(Block::new().style(Style::default().bg(theme.card_bg)), area);

    let [title, gauge, description] = area.layout(&Layout::vertical([Constraint::Length(1); 3]));

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Code Review Score",
            Style::default().fg(theme.review_fg).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        title,
    );

    // Gauge panics outside 0.0..=1.0; the label still shows the raw score.
    let ratio = (score as f64 / 100.0).clamp(0.0, 1.0);
    frame.render_widget(
        Gauge::default()
            .ratio(ratio)
            .label(Span::styled(
                score.to_string(),
                Style::default().fg(theme.review_fg).add_modifier(Modifier::BOLD),
            ))
            .gauge_style(Style::default().fg(color).bg(theme.score_track)),
        gauge,
    );

    frame.render_widget(
        Paragraph::new(Line::styled(score_description(score), Style::default().fg(color)))
            .alignment(Alignment::Center),
        description,
    );
}

fn render_badges(frame: &mut Frame, area: Rect, result: &ReviewResult, theme: &Theme) {
    let cells: [Rect; 3] =
        area.layout(&Layout::horizontal([Constraint::Ratio(1, 3); 3]).spacing(Spacing::Space(1)));
    for (badge, cell) in metric_badges(&result.metrics).iter().zip(cells) {
        frame.render_widget(
            Paragraph::new(format!("{} {} {}", badge.icon, badge.count, badge.label))
                .style(Style::default().bg(theme.badge_bg).fg(theme.review_fg))
                .alignment(Alignment::Center),
            cell,
        );
    }
}
