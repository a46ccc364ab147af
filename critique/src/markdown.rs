//! Markdown narrative to styled ratatui lines.
//!
//! Covers what review narratives actually use: headings, paragraphs,
//! emphasis, inline code, fenced code blocks (syntax highlighted), nested
//! lists, block quotes, and rules. Tables and HTML fall through as plain text.
//! Line wrapping is left to the `Paragraph` that displays the result.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::highlight::highlight_code;

/// Colors the renderer needs from the active theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkdownStyle {
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub syntax_theme: &'static str,
}

/// Renders `source` to owned lines.
pub fn render_markdown(source: &str, style: &MarkdownStyle) -> Vec<Line<'static>> {
    let mut renderer = Renderer::new(*style);
    for event in Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH) {
        renderer.handle(event);
    }
    renderer.finish()
}

/// Rendered narrative lines, kept until the source text or style changes.
#[derive(Debug, Default)]
pub struct MarkdownCache {
    key: Option<(String, MarkdownStyle)>,
    lines: Vec<Line<'static>>,
}

impl MarkdownCache {
    /// Returns the lines for `source`, rendering only on a cache miss.
    pub fn lines(&mut self, source: &str, style: &MarkdownStyle) -> &[Line<'static>] {
        let hit = self
            .key
            .as_ref()
            .is_some_and(|(cached, cached_style)| cached == source && cached_style == style);
        if !hit {
            self.lines = render_markdown(source, style);
            self.key = Some((source.to_owned(), *style));
        }
        &self.lines
    }
}

struct Renderer {
    style: MarkdownStyle,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    /// One entry per open list: `Some(next_number)` for ordered lists.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    /// Language and collected text of the open fenced code block.
    code: Option<(String, String)>,
}

impl Renderer {
    fn new(style: MarkdownStyle) -> Self {
        Self {
            style,
            lines: Vec::new(),
            current: Vec::new(),
            style_stack: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.style.text)
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_else(|| self.base())
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.current_style().patch(patch);
        self.style_stack.push(next);
    }

    fn pop_style(&mut self) {
        self.style_stack.pop();
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = self.quote_prefix();
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn quote_prefix(&self) -> Vec<Span<'static>> {
        if self.quote_depth == 0 {
            return Vec::new();
        }
        vec![Span::styled("│ ".repeat(self.quote_depth), Style::default().fg(self.style.muted))]
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        if let Some((_, buf)) = self.code.as_mut() {
            match &event {
                Event::Text(text) => {
                    buf.push_str(text);
                    return;
                }
                Event::End(TagEnd::CodeBlock) => {}
                _ => return,
            }
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                let style = self.current_style();
                self.current.push(Span::styled(text.into_string(), style));
            }
            Event::Code(text) => {
                let style = Style::default().fg(self.style.accent);
                self.current.push(Span::styled(format!("`{text}`"), style));
            }
            Event::Html(text) | Event::InlineHtml(text) => {
                self.current.push(Span::styled(text.into_string(), self.base()));
            }
            Event::SoftBreak => self.current.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(self.style.muted),
                )));
                self.blank();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.push_style(
                    Style::default().fg(self.style.accent).add_modifier(Modifier::BOLD),
                );
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or("").to_owned()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_owned(),
                };
                self.current.push(Span::styled(
                    format!("{}{marker}", "  ".repeat(depth)),
                    Style::default().fg(self.style.muted),
                ));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Heading(_) => {
                self.pop_style();
                self.flush();
                self.blank();
            }
            TagEnd::CodeBlock => {
                if let Some((lang, buf)) = self.code.take() {
                    let code = buf.strip_suffix('\n').unwrap_or(&buf);
                    for line in highlight_code(code, &lang, self.style.syntax_theme) {
                        let mut spans = self.quote_prefix();
                        spans.push(Span::raw("  "));
                        spans.extend(line.spans);
                        self.lines.push(Line::from(spans));
                    }
                }
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> MarkdownStyle {
        MarkdownStyle {
            text: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            syntax_theme: "base16-ocean.dark",
        }
    }

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_markdown("", &style()).is_empty());
    }

    #[test]
    fn heading_is_bold_accent_and_separated() {
        let lines = render_markdown("## Summary\nAll good.", &style());
        assert_eq!(plain(&lines), ["Summary", "", "All good."]);
        let heading = &lines[0].spans[0];
        assert_eq!(heading.style.fg, Some(Color::Cyan));
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn lists_get_markers_and_nesting() {
        let lines = render_markdown("- one\n- two\n  1. a\n  2. b\n", &style());
        assert_eq!(plain(&lines), ["• one", "• two", "  1. a", "  2. b"]);
    }

    #[test]
    fn fenced_code_keeps_lines_and_indents() {
        let src = "Fix:\n\n```js\nconst a = 1;\nconst b = 2;\n```\n";
        let lines = render_markdown(src, &style());
        assert_eq!(plain(&lines), ["Fix:", "", "  const a = 1;", "  const b = 2;"]);
    }

    #[test]
    fn inline_code_and_emphasis_are_styled() {
        let lines = render_markdown("Use `let` *here*", &style());
        assert_eq!(plain(&lines), ["Use `let` here"]);
        let em = lines[0].spans.iter().find(|s| s.content == "here").unwrap();
        assert!(em.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn cache_rerenders_only_when_source_or_style_changes() {
        let mut cache = MarkdownCache::default();
        assert_eq!(plain(cache.lines("one", &style())), ["one"]);

        // Same source and style: the stored lines come back untouched.
        cache.lines.clear();
        assert!(cache.lines("one", &style()).is_empty());

        assert_eq!(plain(cache.lines("two", &style())), ["two"]);

        cache.lines.clear();
        let light = MarkdownStyle { text: Color::Black, ..style() };
        let lines = cache.lines("two", &light);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Black));
    }

    #[test]
    fn block_quote_is_prefixed() {
        let lines = render_markdown("> careful", &style());
        assert_eq!(plain(&lines), ["│ careful"]);
    }
}
