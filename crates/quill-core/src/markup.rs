//! Inline markup formatter.
//!
//! Post bodies use a tiny dialect: `**bold**`, `*italic*`, `__underline__`
//! and newline-separated paragraphs. [`format`] turns raw text into
//! structural [`Line`]s of [`Span`]s; nothing here produces markup from user
//! text, so renderers can escape every span before styling it.
//!
//! The three delimiters are resolved by sequential passes over each line in
//! the fixed order bold, italic, underline. Each pass is a left-to-right,
//! lazy, non-overlapping scan. Markers placed by an earlier pass are not text:
//! they never count as delimiters, but a later match may enclose or cross
//! them. That is why [`Emphasis`] is a set of flags rather than a single style.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One of the three inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Bold,
    Italic,
    Underline,
}

impl Style {
    /// Pass order.
    pub const ALL: [Style; 3] = [Style::Bold, Style::Italic, Style::Underline];

    /// The delimiter written on both sides of the styled text.
    pub fn token(self) -> &'static str {
        match self {
            Style::Bold => "**",
            Style::Italic => "*",
            Style::Underline => "__",
        }
    }

    fn index(self) -> usize {
        match self {
            Style::Bold => 0,
            Style::Italic => 1,
            Style::Underline => 2,
        }
    }
}

/// The set of styles applied to a span. `Emphasis::NONE` is plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis {
        bold: false,
        italic: false,
        underline: false,
    };
    pub const BOLD: Emphasis = Emphasis {
        bold: true,
        ..Emphasis::NONE
    };
    pub const ITALIC: Emphasis = Emphasis {
        italic: true,
        ..Emphasis::NONE
    };
    pub const UNDERLINE: Emphasis = Emphasis {
        underline: true,
        ..Emphasis::NONE
    };

    pub fn has(self, style: Style) -> bool {
        match style {
            Style::Bold => self.bold,
            Style::Italic => self.italic,
            Style::Underline => self.underline,
        }
    }
}

impl From<Style> for Emphasis {
    fn from(style: Style) -> Self {
        match style {
            Style::Bold => Emphasis::BOLD,
            Style::Italic => Emphasis::ITALIC,
            Style::Underline => Emphasis::UNDERLINE,
        }
    }
}

impl std::ops::BitOr for Emphasis {
    type Output = Emphasis;

    fn bitor(self, rhs: Emphasis) -> Emphasis {
        Emphasis {
            bold: self.bold || rhs.bold,
            italic: self.italic || rhs.italic,
            underline: self.underline || rhs.underline,
        }
    }
}

/// A contiguous run of text sharing one emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::NONE)
    }
}

/// A formatted line of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spans", rename_all = "lowercase")]
pub enum Line {
    /// Empty or whitespace-only source line.
    Blank,
    Text(Vec<Span>),
}

impl Line {
    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Blank)
    }

    pub fn spans(&self) -> &[Span] {
        match self {
            Line::Blank => &[],
            Line::Text(spans) => spans,
        }
    }
}

/// Format raw post text into lines of styled spans. Never fails.
pub fn format(raw: &str) -> Vec<Line> {
    raw.split('\n').map(format_line).collect()
}

/// Format a single line (no `'\n'` inside).
pub fn format_line(line: &str) -> Line {
    if line.trim().is_empty() {
        return Line::Blank;
    }

    let mut tokens: Vec<Token> = line.chars().map(Token::Char).collect();
    for style in Style::ALL {
        tokens = resolve(&tokens, style);
    }
    Line::Text(into_spans(&tokens))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Char(char),
    Open(Style),
    Close(Style),
}

/// Characters the lazy body of a match cannot cross.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\u{2028}' | '\u{2029}')
}

fn delimiter_at(tokens: &[Token], at: usize, delimiter: &[char]) -> bool {
    tokens.len() >= at + delimiter.len()
        && tokens[at..at + delimiter.len()]
            .iter()
            .zip(delimiter)
            .all(|(token, d)| *token == Token::Char(*d))
}

/// One pass: replace every `<delim>body<delim>` with Open/Close markers.
fn resolve(tokens: &[Token], style: Style) -> Vec<Token> {
    let delimiter: Vec<char> = style.token().chars().collect();
    let width = delimiter.len();
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if delimiter_at(tokens, i, &delimiter) {
            let body = i + width;
            let close = (body..tokens.len())
                .take_while(|&j| !matches!(tokens[j], Token::Char(c) if is_line_terminator(c)))
                .find(|&j| delimiter_at(tokens, j, &delimiter));
            if let Some(close) = close {
                out.push(Token::Open(style));
                out.extend_from_slice(&tokens[body..close]);
                out.push(Token::Close(style));
                i = close + width;
                continue;
            }
        }
        out.push(tokens[i]);
        i += 1;
    }

    out
}

fn into_spans(tokens: &[Token]) -> Vec<Span> {
    let mut depth = [0u32; 3];
    let mut spans: Vec<Span> = Vec::new();

    for token in tokens {
        match *token {
            Token::Open(style) => depth[style.index()] += 1,
            Token::Close(style) => {
                depth[style.index()] = depth[style.index()].saturating_sub(1);
            }
            Token::Char(c) => {
                let emphasis = Emphasis {
                    bold: depth[0] > 0,
                    italic: depth[1] > 0,
                    underline: depth[2] > 0,
                };
                match spans.last_mut() {
                    Some(last) if last.emphasis == emphasis => last.text.push(c),
                    _ => spans.push(Span::new(c.to_string(), emphasis)),
                }
            }
        }
    }

    spans
}

/// Render formatted lines as HTML. All span text is escaped.
///
/// Blank lines become `<br>`, text lines `<p>` elements, with emphasis applied
/// through `<strong>`, `<em>` and `<u>` in that nesting order.
pub fn render_html(lines: &[Line]) -> String {
    let mut html = String::new();
    for (n, line) in lines.iter().enumerate() {
        if n > 0 {
            html.push('\n');
        }
        match line {
            Line::Blank => html.push_str("<br>"),
            Line::Text(spans) => {
                html.push_str("<p>");
                for span in spans {
                    push_span_html(&mut html, span);
                }
                html.push_str("</p>");
            }
        }
    }
    html
}

fn push_span_html(html: &mut String, span: &Span) {
    const TAGS: [(Style, &str); 3] = [
        (Style::Bold, "strong"),
        (Style::Italic, "em"),
        (Style::Underline, "u"),
    ];

    for (style, tag) in TAGS {
        if span.emphasis.has(style) {
            let _ = write!(html, "<{tag}>");
        }
    }
    escape_html_into(html, &span.text);
    for (style, tag) in TAGS.iter().rev() {
        if span.emphasis.has(*style) {
            let _ = write!(html, "</{tag}>");
        }
    }
}

fn escape_html_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

/// Render formatted lines as plain text with the markup removed.
pub fn render_plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.spans().iter().map(|s| s.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(raw: &str) -> Vec<Span> {
        let lines = format(raw);
        assert_eq!(lines.len(), 1, "expected a single line for {raw:?}");
        lines[0].spans().to_vec()
    }

    #[test]
    fn test_empty_input_is_one_blank_line() {
        assert_eq!(format(""), vec![Line::Blank]);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let lines = format("a\n\nb");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Line::Text(vec![Span::plain("a")]));
        assert!(lines[1].is_blank());
        assert_eq!(lines[2], Line::Text(vec![Span::plain("b")]));
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let lines = format("a\n   \t\nb\n");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].is_blank());
        assert!(lines[3].is_blank());
    }

    #[test]
    fn test_bold() {
        assert_eq!(spans("**x**"), vec![Span::new("x", Emphasis::BOLD)]);
    }

    #[test]
    fn test_italic_and_underline() {
        assert_eq!(
            spans("*x* and __y__"),
            vec![
                Span::new("x", Emphasis::ITALIC),
                Span::plain(" and "),
                Span::new("y", Emphasis::UNDERLINE),
            ]
        );
    }

    #[test]
    fn test_bold_pass_runs_before_italic() {
        // The bold pass consumes both `**` pairs; the lone `*` left inside is
        // unbalanced for the italic pass and stays literal.
        assert_eq!(spans("**a*b**"), vec![Span::new("a*b", Emphasis::BOLD)]);
    }

    #[test]
    fn test_matches_are_lazy_and_non_overlapping() {
        assert_eq!(
            spans("**a** mid **b**"),
            vec![
                Span::new("a", Emphasis::BOLD),
                Span::plain(" mid "),
                Span::new("b", Emphasis::BOLD),
            ]
        );
    }

    #[test]
    fn test_lone_markers_stay_literal() {
        assert_eq!(spans("2 * 3 = 6"), vec![Span::plain("2 * 3 = 6")]);
        assert_eq!(spans("snake_case"), vec![Span::plain("snake_case")]);
    }

    #[test]
    fn test_unpaired_double_star_becomes_empty_italic() {
        assert_eq!(spans("**open"), vec![Span::plain("open")]);
        assert_eq!(spans("a ** b"), vec![Span::plain("a  b")]);
        assert_eq!(render_plain(&format("**open")), "open");
    }

    #[test]
    fn test_later_pass_may_enclose_earlier_markers() {
        assert_eq!(
            spans("*a **b** c*"),
            vec![
                Span::new("a ", Emphasis::ITALIC),
                Span::new("b", Emphasis::BOLD | Emphasis::ITALIC),
                Span::new(" c", Emphasis::ITALIC),
            ]
        );
    }

    #[test]
    fn test_triple_star_resolves_bold_first() {
        // Bold takes `***a**` as `**` + `*a` + `**`; italic then pairs the
        // inner `*` with the trailing one, crossing the bold close marker.
        assert_eq!(
            spans("***a***"),
            vec![Span::new("a", Emphasis::BOLD | Emphasis::ITALIC)]
        );
    }

    #[test]
    fn test_empty_match_produces_no_text() {
        assert_eq!(format("****"), vec![Line::Text(vec![])]);
    }

    #[test]
    fn test_match_does_not_cross_carriage_return() {
        assert_eq!(spans("*a\r*"), vec![Span::plain("*a\r*")]);
        assert_eq!(spans("*a*\r"), vec![Span::new("a", Emphasis::ITALIC), Span::plain("\r")]);
    }

    #[test]
    fn test_render_html_escapes_text() {
        let html = render_html(&format("**<script>alert('x')</script>**\n\nTom & Jerry"));
        assert_eq!(
            html,
            "<p><strong>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</strong></p>\n<br>\n<p>Tom &amp; Jerry</p>"
        );
    }

    #[test]
    fn test_render_html_nests_combined_emphasis() {
        let html = render_html(&format("*a **b***"));
        assert!(html.contains("<strong><em>b</em></strong>"));
    }

    #[test]
    fn test_render_plain_strips_markup() {
        assert_eq!(
            render_plain(&format("**Bold** start\n\n*and* __end__")),
            "Bold start\n\nand end"
        );
    }
}
