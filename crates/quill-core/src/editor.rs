//! Editor toolbar actions.
//!
//! The bold/italic/underline buttons wrap the current selection in the
//! style's delimiter pair and keep the original text selected. Positions are
//! character offsets, matching what a text field reports.

use serde::{Deserialize, Serialize};

use crate::markup::Style;

/// Text and selection after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

/// Wrap `text[start..end]` (in chars) with the delimiters of `style`.
///
/// Out-of-range positions are clamped to the text and a reversed range is
/// normalized, so the action is total. An empty selection inserts an empty
/// delimiter pair with the caret between the halves.
pub fn wrap_selection(text: &str, start: usize, end: usize, style: Style) -> Edit {
    let len = text.chars().count();
    let (start, end) = (start.min(len), end.min(len));
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let token = style.token();
    let token_len = token.chars().count();
    let byte_start = byte_offset(text, start);
    let byte_end = byte_offset(text, end);

    let mut wrapped = String::with_capacity(text.len() + 2 * token.len());
    wrapped.push_str(&text[..byte_start]);
    wrapped.push_str(token);
    wrapped.push_str(&text[byte_start..byte_end]);
    wrapped.push_str(token);
    wrapped.push_str(&text[byte_end..]);

    Edit {
        text: wrapped,
        selection_start: start + token_len,
        selection_end: end + token_len,
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{self, Emphasis, Span};

    fn selected(edit: &Edit) -> String {
        edit.text
            .chars()
            .skip(edit.selection_start)
            .take(edit.selection_end - edit.selection_start)
            .collect()
    }

    #[test]
    fn test_wrap_reselects_original_text() {
        let edit = wrap_selection("hello world", 6, 11, Style::Bold);
        assert_eq!(edit.text, "hello **world**");
        assert_eq!(selected(&edit), "world");
    }

    #[test]
    fn test_bold_wrap_round_trips_through_formatter() {
        let text = "Qubits stay coherent at room temperature";
        let edit = wrap_selection(text, 7, 20, Style::Bold);
        let lines = markup::format(&edit.text);
        let bold: Vec<&Span> = lines[0]
            .spans()
            .iter()
            .filter(|s| s.emphasis == Emphasis::BOLD)
            .collect();
        assert_eq!(bold.len(), 1);
        assert_eq!(bold[0].text, "stay coherent");
        assert_eq!(markup::render_plain(&lines), text);
    }

    #[test]
    fn test_wrap_uses_style_tokens() {
        assert_eq!(wrap_selection("ab", 0, 2, Style::Italic).text, "*ab*");
        assert_eq!(wrap_selection("ab", 0, 2, Style::Underline).text, "__ab__");
    }

    #[test]
    fn test_empty_selection_inserts_pair_with_caret_inside() {
        let edit = wrap_selection("ab", 1, 1, Style::Bold);
        assert_eq!(edit.text, "a****b");
        assert_eq!((edit.selection_start, edit.selection_end), (3, 3));
    }

    #[test]
    fn test_reversed_and_out_of_range_positions() {
        let edit = wrap_selection("abc", 99, 1, Style::Italic);
        assert_eq!(edit.text, "a*bc*");
        assert_eq!(selected(&edit), "bc");
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let edit = wrap_selection("Ñandú rápido", 6, 12, Style::Bold);
        assert_eq!(edit.text, "Ñandú **rápido**");
        assert_eq!(selected(&edit), "rápido");
    }
}
