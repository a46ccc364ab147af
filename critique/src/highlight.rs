//! syntect-based syntax highlighting for the editor and for code fences in
//! the review narrative.
//!
//! The syntax and theme sets are loaded once, lazily, and shared. Highlighting
//! the whole buffer is far slower than one frame, so the editor keeps its lines
//! in a [`HighlightCache`] and only re-highlights when its inputs change.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Finds a syntax by file extension or fence token (`js`, `rust`, `py`, ...).
fn find_syntax(token: &str) -> &'static SyntaxReference {
    let token = token.trim();
    PS.find_syntax_by_token(token)
        .or_else(|| PS.find_syntax_by_extension(token))
        .unwrap_or_else(|| PS.find_syntax_plain_text())
}

/// Highlights `code` line by line, returning one `Line` per `\n`-separated line.
///
/// `language` is a file extension or fence token; unknown values fall back to
/// plain text. Falls back to unstyled lines if `theme_name` is not a bundled
/// syntect theme.
pub fn highlight_code(code: &str, language: &str, theme_name: &str) -> Vec<Line<'static>> {
    let theme = TS.themes.get(theme_name).or_else(|| TS.themes.values().next());
    let Some(theme) = theme else {
        return code.split('\n').map(|l| Line::raw(l.to_owned())).collect();
    };

    let mut h = HighlightLines::new(find_syntax(language), theme);
    code.split('\n')
        .map(|line| {
            // The newline-aware syntax set expects each line to end in '\n'.
            let with_newline = format!("{line}\n");
            let ranges = h.highlight_line(&with_newline, &PS).unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| syntect_to_span(style, text.trim_end_matches('\n')))
                .filter(|s| !s.content.is_empty())
                .collect();
            if spans.is_empty() {
                Line::raw(line.to_owned())
            } else {
                Line::from(spans)
            }
        })
        .collect()
}

/// Highlighted editor lines, kept until the code, language, or syntax theme
/// changes.
#[derive(Debug, Default)]
pub struct HighlightCache {
    code: String,
    language: String,
    theme: &'static str,
    lines: Option<Vec<Line<'static>>>,
}

impl HighlightCache {
    /// Returns the lines for `code`, highlighting only on a cache miss.
    pub fn lines(&mut self, code: &str, language: &str, theme: &'static str) -> &[Line<'static>] {
        let stale = self.code != code || self.language != language || self.theme != theme;
        if stale || self.lines.is_none() {
            self.code = code.to_owned();
            self.language = language.to_owned();
            self.theme = theme;
            self.lines = Some(highlight_code(code, language, theme));
        }
        self.lines.as_deref().unwrap_or_default()
    }
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Only the foreground and font style are kept; panel backgrounds come from
/// the active critique theme.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn one_output_line_per_input_line() {
        let code = "function sum() {\n  return 1 + 1\n}";
        let lines = highlight_code(code, "js", "base16-ocean.dark");
        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[1]), "  return 1 + 1");
    }

    #[test]
    fn unknown_language_and_theme_still_render_text() {
        let lines = highlight_code("a\n\nb", "no-such-lang", "no-such-theme");
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, ["a", "", "b"]);
    }

    #[test]
    fn cache_rehighlights_only_when_inputs_change() {
        let mut cache = HighlightCache::default();
        assert_eq!(cache.lines("a\nb", "js", "base16-ocean.dark").len(), 2);

        // Unchanged inputs reuse the stored lines as they are.
        cache.lines = Some(Vec::new());
        assert!(cache.lines("a\nb", "js", "base16-ocean.dark").is_empty());

        assert_eq!(cache.lines("a\nb\nc", "js", "base16-ocean.dark").len(), 3);
        cache.lines = Some(Vec::new());
        assert_eq!(cache.lines("a\nb\nc", "js", "InspiredGitHub").len(), 3);
        cache.lines = Some(Vec::new());
        assert_eq!(cache.lines("a\nb\nc", "rs", "InspiredGitHub").len(), 3);
    }

    #[test]
    fn known_language_produces_colored_spans() {
        let lines = highlight_code("fn main() {}", "rs", "InspiredGitHub");
        assert!(lines[0].spans.iter().any(|s| s.style.fg.is_some()));
    }
}
