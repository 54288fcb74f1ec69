//! Line model and cursor navigation.
//!
//! Rows and columns are 1-indexed and count bytes. A buffer always has at
//! least one line, so an empty buffer is a single empty line.

use crate::keys::Direction;

use super::EditSession;

/// Offset of the first byte of 1-indexed `row`, given every line's length.
fn start_of_row(line_lengths: &[usize], row: usize) -> usize {
    line_lengths
        .iter()
        .take(row.saturating_sub(1))
        .map(|len| len + 1)
        .sum()
}

impl EditSession {
    /// Derives row and column from the cursor offset.
    pub fn recompute_cursor_position(&mut self) {
        let mut row = 1;
        let mut col = 1;
        for byte in self.buffer.bytes().take(self.cursor_offset) {
            if byte == b'\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Buffer contents split on `\n`.
    pub fn lines(&self) -> Vec<Vec<u8>> {
        self.buffer
            .to_bytes()
            .split(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Byte length of each line, excluding the terminator.
    pub fn line_lengths(&self) -> Vec<usize> {
        let mut lengths = vec![0];
        for byte in self.buffer.bytes() {
            if byte == b'\n' {
                lengths.push(0);
            } else if let Some(len) = lengths.last_mut() {
                *len += 1;
            }
        }
        lengths
    }

    pub fn line_count(&self) -> usize {
        self.line_lengths().len()
    }

    /// Offset of the start of 1-indexed `row`.
    pub fn line_start_offset(&self, row: usize) -> usize {
        start_of_row(&self.line_lengths(), row)
    }

    /// Arrow-key navigation.
    ///
    /// Row and column move first and the offset follows them; the result is
    /// clamped to the buffer length.
    pub fn move_cursor(&mut self, direction: Direction) {
        let lengths = self.line_lengths();
        let line_len = |row: usize| lengths.get(row - 1).copied().unwrap_or(0);

        match direction {
            Direction::Left => {
                if self.cursor_col > 1 {
                    self.cursor_col -= 1;
                    self.cursor_offset = self.cursor_offset.saturating_sub(1);
                } else if self.cursor_row > 1 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_len(self.cursor_row) + 1;
                    self.cursor_offset = self.cursor_offset.saturating_sub(1);
                }
            }
            Direction::Right => {
                if self.cursor_col <= line_len(self.cursor_row) {
                    self.cursor_col += 1;
                    self.cursor_offset += 1;
                } else if self.cursor_row < lengths.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 1;
                    self.cursor_offset += 1;
                }
            }
            Direction::Up => {
                if self.cursor_row > 1 {
                    self.cursor_row -= 1;
                    self.snap_to_row(&lengths);
                }
            }
            Direction::Down => {
                if self.cursor_row < lengths.len() {
                    self.cursor_row += 1;
                    self.snap_to_row(&lengths);
                }
            }
        }

        if self.cursor_offset > self.buffer.len() {
            self.cursor_offset = self.buffer.len();
            self.recompute_cursor_position();
        }
    }

    /// Clamps the column to the current row and derives the offset.
    fn snap_to_row(&mut self, lengths: &[usize]) {
        let len = lengths.get(self.cursor_row - 1).copied().unwrap_or(0);
        self.cursor_col = self.cursor_col.min(len + 1);
        self.cursor_offset = start_of_row(lengths, self.cursor_row) + self.cursor_col - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;

    fn at(text: &str, offset: usize) -> EditSession {
        let mut s = EditSession::with_text(text, SessionOptions::default());
        s.set_cursor_offset(offset);
        s
    }

    fn pos(s: &EditSession) -> (usize, usize, usize) {
        (s.cursor_row(), s.cursor_col(), s.cursor_offset())
    }

    #[test]
    fn test_recompute_counts_newlines() {
        let s = at("ab\ncd\n", 4);
        assert_eq!(pos(&s), (2, 2, 4));
        let s = at("ab\ncd\n", 6);
        assert_eq!(pos(&s), (3, 1, 6));
    }

    #[test]
    fn test_lines_of_empty_buffer() {
        let s = at("", 0);
        assert_eq!(s.lines(), vec![Vec::<u8>::new()]);
        assert_eq!(s.line_lengths(), vec![0]);
    }

    #[test]
    fn test_lines_keep_trailing_empty_line() {
        let s = at("a\nbc\n", 0);
        assert_eq!(s.lines(), vec![b"a".to_vec(), b"bc".to_vec(), Vec::new()]);
        assert_eq!(s.line_lengths(), vec![1, 2, 0]);
        assert_eq!(s.line_count(), 3);
    }

    #[test]
    fn test_line_start_offset() {
        let s = at("one\ntwo\nthree", 0);
        assert_eq!(s.line_start_offset(1), 0);
        assert_eq!(s.line_start_offset(2), 4);
        assert_eq!(s.line_start_offset(3), 8);
    }

    #[test]
    fn test_right_then_left_across_line_break() {
        let mut s = at("one\ntwo\nthree", 3);
        assert_eq!(pos(&s), (1, 4, 3));
        s.move_cursor(Direction::Right);
        assert_eq!(pos(&s), (2, 1, 4));
        s.move_cursor(Direction::Left);
        assert_eq!(pos(&s), (1, 4, 3));
    }

    #[test]
    fn test_left_at_document_start_is_noop() {
        let mut s = at("abc", 0);
        s.move_cursor(Direction::Left);
        assert_eq!(pos(&s), (1, 1, 0));
    }

    #[test]
    fn test_right_at_document_end_is_noop() {
        let mut s = at("ab\ncd", 5);
        s.move_cursor(Direction::Right);
        assert_eq!(pos(&s), (2, 3, 5));
    }

    #[test]
    fn test_up_clamps_column_to_shorter_line() {
        let mut s = at("ab\nlonger", 8);
        assert_eq!(pos(&s), (2, 6, 8));
        s.move_cursor(Direction::Up);
        assert_eq!(pos(&s), (1, 3, 2));
    }

    #[test]
    fn test_down_keeps_column_when_it_fits() {
        let mut s = at("abcd\nefgh\nij", 2);
        s.move_cursor(Direction::Down);
        assert_eq!(pos(&s), (2, 3, 7));
        s.move_cursor(Direction::Down);
        assert_eq!(pos(&s), (3, 3, 12));
        s.move_cursor(Direction::Down);
        assert_eq!(pos(&s), (3, 3, 12));
    }

    #[test]
    fn test_up_on_first_row_is_noop() {
        let mut s = at("abc\ndef", 2);
        s.move_cursor(Direction::Up);
        assert_eq!(pos(&s), (1, 3, 2));
    }
}
