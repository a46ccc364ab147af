//! Color theme system for critique.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface critique renders. There are two built-in palettes, selected by the
//! persisted [`ThemePreference`]. The score tier colors are not here: they are
//! fixed per tier and come from `critique_core::presentation`.

use critique_core::presentation::ScoreTier;
use critique_core::ThemePreference;
use ratatui::style::Color;

/// All color values used across critique's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which preference produced this palette.
    pub preference: ThemePreference,

    // Panel borders
    /// Border color for the focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Editor
    pub editor_bg: Color,
    pub editor_fg: Color,
    /// Line-number gutter.
    pub gutter: Color,
    /// syntect theme name used for code highlighting.
    pub syntax_theme: &'static str,

    // Review panel
    pub review_bg: Color,
    pub review_fg: Color,
    /// Background of the score card.
    pub card_bg: Color,
    /// Unfilled part of the score gauge.
    pub score_track: Color,
    /// Background of each metric badge.
    pub badge_bg: Color,
    /// Headings and inline code in the narrative.
    pub accent: Color,
    /// Secondary text such as placeholders and list bullets.
    pub muted: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    /// Border of the failure notice popup.
    pub notice_border: Color,
}

impl Theme {
    /// Dark palette. The default when no preference is stored.
    pub fn dark() -> Self {
        Self {
            preference: ThemePreference::Dark,

            border_active: Color::Rgb(0x61, 0xAF, 0xEF),
            border_inactive: Color::Rgb(0x55, 0x55, 0x55),

            editor_bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            editor_fg: Color::Rgb(0xF8, 0xF8, 0xF2),
            gutter: Color::Rgb(0x75, 0x75, 0x75),
            syntax_theme: "base16-ocean.dark",

            review_bg: Color::Rgb(0x11, 0x11, 0x11),
            review_fg: Color::Rgb(0xEE, 0xEE, 0xEE),
            card_bg: Color::Rgb(0x22, 0x22, 0x22),
            score_track: Color::Rgb(0x44, 0x44, 0x44),
            badge_bg: Color::Rgb(0x33, 0x33, 0x33),
            accent: Color::Rgb(0x61, 0xAF, 0xEF),
            muted: Color::Rgb(0x88, 0x88, 0x88),

            status_bar_bg: Color::Rgb(0x22, 0x22, 0x22),
            status_bar_fg: Color::Rgb(0xFF, 0xFF, 0xFF),

            notice_border: Color::Rgb(0xF4, 0x43, 0x36),
        }
    }

    /// Light palette.
    pub fn light() -> Self {
        Self {
            preference: ThemePreference::Light,

            border_active: Color::Rgb(0x1E, 0x66, 0xF5),
            border_inactive: Color::Rgb(0xBB, 0xBB, 0xBB),

            editor_bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            editor_fg: Color::Rgb(0x00, 0x00, 0x00),
            gutter: Color::Rgb(0x99, 0x99, 0x99),
            syntax_theme: "InspiredGitHub",

            review_bg: Color::Rgb(0xFA, 0xFA, 0xFA),
            review_fg: Color::Rgb(0x00, 0x00, 0x00),
            card_bg: Color::Rgb(0xF0, 0xF0, 0xF0),
            score_track: Color::Rgb(0xDD, 0xDD, 0xDD),
            badge_bg: Color::Rgb(0xEA, 0xEA, 0xEA),
            accent: Color::Rgb(0x1E, 0x66, 0xF5),
            muted: Color::Rgb(0x66, 0x66, 0x66),

            status_bar_bg: Color::Rgb(0xF8, 0xF8, 0xF8),
            status_bar_fg: Color::Rgb(0x00, 0x00, 0x00),

            notice_border: Color::Rgb(0xF4, 0x43, 0x36),
        }
    }

    pub fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    /// Label for the toggle hint: names the theme a toggle would switch to.
    pub fn toggle_label(&self) -> &'static str {
        match self.preference {
            ThemePreference::Light => "🌙 Dark Mode",
            ThemePreference::Dark => "☀️ Light Mode",
        }
    }
}

/// The fixed display color of a score tier.
pub fn tier_color(tier: ScoreTier) -> Color {
    let (r, g, b) = tier.rgb();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_preference() {
        assert_eq!(Theme::from_preference(ThemePreference::Light).preference, ThemePreference::Light);
        assert_eq!(Theme::from_preference(ThemePreference::Dark).editor_bg, Color::Rgb(0x1E, 0x1E, 0x1E));
    }

    #[test]
    fn tier_colors_do_not_depend_on_theme() {
        assert_eq!(tier_color(ScoreTier::Strong), Color::Rgb(0x4C, 0xAF, 0x50));
        assert_eq!(tier_color(ScoreTier::Weak), Color::Rgb(0xFF, 0x98, 0x00));
    }
}
