use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Apply a line-editing key to `buf` at byte offset `cursor`.
/// Returns false if the key is not a text-editing key.
pub(super) fn edit_text(buf: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    *cursor = (*cursor).min(buf.len());
    match key.code {
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buf.len(),
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                buf.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                buf.drain(*cursor..next);
            }
        }
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            buf.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => return false,
    }
    true
}

/// Insert a line break at `cursor` (multi-line fields only)
pub(super) fn insert_newline(buf: &mut String, cursor: &mut usize) {
    *cursor = (*cursor).min(buf.len());
    buf.insert(*cursor, '\n');
    *cursor += 1;
}

/// True for Ctrl+S, which saves or submits from any field
pub(super) fn is_commit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

/// True for Ctrl+C, which quits from any mode
pub(super) fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
