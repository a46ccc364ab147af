//! Cursor-based editing of the session's code buffer.
//!
//! The buffer itself lives in `SessionStore`; this module only knows how to
//! turn one keystroke into a new string plus a new cursor. The caller copies
//! the code out, applies the edit, and hands the result back through
//! `SessionStore::set_code`.
//!
//! Cursor columns count `char`s, not bytes, so multi-byte text edits cleanly.

/// Spaces inserted by the Tab key.
const TAB: &str = "  ";

/// Row/column position inside the buffer. Both are zero-based.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// A change to the buffer's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    /// Inserts a line break, carrying over the current line's indentation.
    Newline,
    Tab,
    Backspace,
    Delete,
    /// Pasted text, inserted verbatim (CRLF normalised to LF).
    Paste(String),
}

/// A cursor movement that leaves the text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp(usize),
    PageDown(usize),
}

/// Byte offsets at which each line starts. Always has at least one entry.
fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Returns line `row` without its trailing newline.
pub fn line(text: &str, row: usize) -> &str {
    text.split('\n').nth(row).unwrap_or("")
}

pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

fn line_len(text: &str, row: usize) -> usize {
    line(text, row).chars().count()
}

/// Clamps `cursor` to a valid position in `text`.
pub fn clamp(text: &str, cursor: Cursor) -> Cursor {
    let row = cursor.row.min(line_count(text) - 1);
    Cursor { row, col: cursor.col.min(line_len(text, row)) }
}

/// Byte offset of `cursor` in `text`. The cursor must already be clamped.
fn byte_offset(text: &str, cursor: Cursor) -> usize {
    let start = line_starts(text)[cursor.row];
    let current = line(text, cursor.row);
    start
        + current
            .char_indices()
            .nth(cursor.col)
            .map(|(i, _)| i)
            .unwrap_or(current.len())
}

/// Applies `edit` to `text` at `cursor` and moves the cursor past it.
pub fn apply_edit(text: &mut String, cursor: &mut Cursor, edit: Edit) {
    *cursor = clamp(text, *cursor);
    let offset = byte_offset(text, *cursor);

    match edit {
        Edit::Insert(c) => {
            text.insert(offset, c);
            cursor.col += 1;
        }
        Edit::Tab => {
            text.insert_str(offset, TAB);
            cursor.col += TAB.len();
        }
        Edit::Newline => {
            let indent: String = line(text, cursor.row)
                .chars()
                .take(cursor.col)
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            text.insert_str(offset, &format!("\n{indent}"));
            cursor.row += 1;
            cursor.col = indent.chars().count();
        }
        Edit::Backspace => {
            if cursor.col > 0 {
                let prev = byte_offset(text, Cursor { col: cursor.col - 1, ..*cursor });
                text.replace_range(prev..offset, "");
                cursor.col -= 1;
            } else if cursor.row > 0 {
                let joined_col = line_len(text, cursor.row - 1);
                text.remove(offset - 1);
                cursor.row -= 1;
                cursor.col = joined_col;
            }
        }
        Edit::Delete => {
            if cursor.col < line_len(text, cursor.row) {
                let next = byte_offset(text, Cursor { col: cursor.col + 1, ..*cursor });
                text.replace_range(offset..next, "");
            } else if cursor.row + 1 < line_count(text) {
                text.remove(offset);
            }
        }
        Edit::Paste(pasted) => {
            let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
            text.insert_str(offset, &pasted);
            let newlines = pasted.matches('\n').count();
            if newlines == 0 {
                cursor.col += pasted.chars().count();
            } else {
                cursor.row += newlines;
                cursor.col = pasted.rsplit('\n').next().unwrap_or("").chars().count();
            }
        }
    }
}

/// Moves `cursor` within `text`.
pub fn apply_motion(text: &str, cursor: &mut Cursor, motion: Motion) {
    *cursor = clamp(text, *cursor);
    let last_row = line_count(text) - 1;

    match motion {
        Motion::Left => {
            if cursor.col > 0 {
                cursor.col -= 1;
            } else if cursor.row > 0 {
                cursor.row -= 1;
                cursor.col = line_len(text, cursor.row);
            }
        }
        Motion::Right => {
            if cursor.col < line_len(text, cursor.row) {
                cursor.col += 1;
            } else if cursor.row < last_row {
                cursor.row += 1;
                cursor.col = 0;
            }
        }
        Motion::Up => cursor.row = cursor.row.saturating_sub(1),
        Motion::Down => cursor.row = (cursor.row + 1).min(last_row),
        Motion::Home => cursor.col = 0,
        Motion::End => cursor.col = line_len(text, cursor.row),
        Motion::PageUp(page) => cursor.row = cursor.row.saturating_sub(page.max(1)),
        Motion::PageDown(page) => cursor.row = (cursor.row + page.max(1)).min(last_row),
    }

    *cursor = clamp(text, *cursor);
}

/// Returns a scroll offset that keeps `row` inside a viewport of `height` rows.
pub fn scroll_to_cursor(scroll: usize, row: usize, height: usize) -> usize {
    if height == 0 {
        return scroll;
    }
    if row < scroll {
        row
    } else if row >= scroll + height {
        row + 1 - height
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Cursor {
        Cursor { row, col }
    }

    #[test]
    fn insert_and_newline_keep_indentation() {
        let mut text = "fn f() {\n    x\n}".to_owned();
        let mut cursor = at(1, 5);
        apply_edit(&mut text, &mut cursor, Edit::Insert(';'));
        apply_edit(&mut text, &mut cursor, Edit::Newline);
        assert_eq!(text, "fn f() {\n    x;\n    \n}");
        assert_eq!(cursor, at(2, 4));
    }

    #[test]
    fn backspace_joins_lines_at_column_zero() {
        let mut text = "ab\ncd".to_owned();
        let mut cursor = at(1, 0);
        apply_edit(&mut text, &mut cursor, Edit::Backspace);
        assert_eq!(text, "abcd");
        assert_eq!(cursor, at(0, 2));

        // Nothing to delete before the very first character.
        let mut cursor = at(0, 0);
        apply_edit(&mut text, &mut cursor, Edit::Backspace);
        assert_eq!(text, "abcd");
    }

    #[test]
    fn delete_removes_char_or_joins_next_line() {
        let mut text = "ab\ncd".to_owned();
        let mut cursor = at(0, 1);
        apply_edit(&mut text, &mut cursor, Edit::Delete);
        assert_eq!(text, "a\ncd");
        apply_edit(&mut text, &mut cursor, Edit::Delete);
        assert_eq!(text, "acd");
        assert_eq!(cursor, at(0, 1));
    }

    #[test]
    fn multibyte_characters_edit_by_char() {
        let mut text = "héllo".to_owned();
        let mut cursor = at(0, 2);
        apply_edit(&mut text, &mut cursor, Edit::Backspace);
        assert_eq!(text, "hllo");
        apply_edit(&mut text, &mut cursor, Edit::Insert('ü'));
        assert_eq!(text, "hüllo");
        assert_eq!(cursor, at(0, 2));
    }

    #[test]
    fn paste_moves_cursor_to_end_of_inserted_text() {
        let mut text = "let = 1;".to_owned();
        let mut cursor = at(0, 4);
        apply_edit(&mut text, &mut cursor, Edit::Paste("a\r\nb ".to_owned()));
        assert_eq!(text, "let a\nb = 1;");
        assert_eq!(cursor, at(1, 2));
    }

    #[test]
    fn motions_clamp_to_line_lengths() {
        let text = "long line\nab\n";
        let mut cursor = at(0, 8);
        apply_motion(text, &mut cursor, Motion::Down);
        assert_eq!(cursor, at(1, 2));
        apply_motion(text, &mut cursor, Motion::Right);
        assert_eq!(cursor, at(2, 0));
        apply_motion(text, &mut cursor, Motion::Left);
        assert_eq!(cursor, at(1, 2));
        apply_motion(text, &mut cursor, Motion::PageUp(10));
        assert_eq!(cursor, at(0, 2));
        apply_motion(text, &mut cursor, Motion::End);
        assert_eq!(cursor, at(0, 9));
    }

    #[test]
    fn stale_cursor_is_clamped_before_editing() {
        let mut text = "x".to_owned();
        let mut cursor = at(7, 7);
        apply_edit(&mut text, &mut cursor, Edit::Insert('y'));
        assert_eq!(text, "xy");
        assert_eq!(cursor, at(0, 2));
    }

    #[test]
    fn scroll_follows_cursor() {
        assert_eq!(scroll_to_cursor(0, 3, 10), 0);
        assert_eq!(scroll_to_cursor(0, 12, 10), 3);
        assert_eq!(scroll_to_cursor(5, 2, 10), 2);
        assert_eq!(scroll_to_cursor(4, 9, 0), 4);
    }
}
