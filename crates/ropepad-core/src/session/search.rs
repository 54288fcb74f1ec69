//! Interactive search over the session buffer.

use crate::keys::Key;
use crate::search::{find_all, next_match};

use super::{EditSession, Interaction};

pub const SEARCH_PROMPT: &str = "Search (Esc to cancel):";

impl EditSession {
    /// Prompts for a query and steps through its occurrences.
    ///
    /// Ctrl-N advances to the next occurrence, wrapping after the last. A
    /// printable key or Escape ends the search with the cursor left on the
    /// current occurrence. When nothing matches the cursor stays put.
    pub fn search(&mut self, io: &mut impl Interaction) {
        let saved_offset = self.cursor_offset;

        let query = match io.prompt(SEARCH_PROMPT) {
            Some(query) if !query.is_empty() => query,
            _ => {
                self.set_status("Search canceled");
                return;
            }
        };
        self.last_search_query = Some(query.clone());

        let Some(matches) = self.occurrences(&query) else {
            return;
        };
        if matches.is_empty() {
            self.set_status(format!("Not found: {query}"));
            self.set_cursor_offset(saved_offset);
            return;
        }

        let total = matches.len();
        let mut current = 0;
        loop {
            self.set_cursor_offset(matches[current]);
            loop {
                self.set_status(format!("Ctrl-N to next {}/{}", current + 1, total));
                match io.next_key(self) {
                    Key::FindNext => break,
                    Key::Escape => return,
                    key if key.is_regular() => return,
                    _ => {}
                }
            }
            current = (current + 1) % total;
        }
    }

    /// Jumps to the next occurrence of the last query after the cursor.
    pub fn find_next(&mut self) {
        let Some(query) = self.last_search_query.clone() else {
            self.set_status("No previous search");
            return;
        };
        let Some(matches) = self.occurrences(&query) else {
            return;
        };
        match next_match(&matches, self.cursor_offset + 1) {
            Some(idx) => {
                self.set_cursor_offset(matches[idx]);
                self.set_status(format!("{}/{}", idx + 1, matches.len()));
            }
            None => self.set_status(format!("Not found: {query}")),
        }
    }

    /// Occurrences of `query` in the buffer, or `None` with a status set
    /// when the query cannot be searched for.
    fn occurrences(&mut self, query: &str) -> Option<Vec<usize>> {
        match find_all(&self.buffer.to_bytes(), query) {
            Ok(matches) => Some(matches),
            Err(e) => {
                tracing::warn!("search for {query:?} failed: {e}");
                self.set_status(format!("Search failed: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::ScriptedIo;
    use crate::session::SessionOptions;

    fn session(text: &str, offset: usize) -> EditSession {
        let mut s = EditSession::with_text(text, SessionOptions::default());
        s.set_cursor_offset(offset);
        s
    }

    #[test]
    fn test_cancelled_prompt() {
        let mut s = session("hello", 2);
        let mut io = ScriptedIo::with_answer(None);
        s.search(&mut io);
        assert_eq!(io.prompts, vec![SEARCH_PROMPT]);
        assert_eq!(s.cursor_offset(), 2);
        assert_eq!(s.status(), Some("Search canceled"));
        assert_eq!(s.last_search_query(), None);
    }

    #[test]
    fn test_empty_query_is_cancel() {
        let mut s = session("hello", 2);
        s.search(&mut ScriptedIo::with_answer(Some("")));
        assert_eq!(s.status(), Some("Search canceled"));
    }

    #[test]
    fn test_not_found_restores_cursor() {
        let mut s = session("hello\nworld", 4);
        s.search(&mut ScriptedIo::with_answer(Some("xyz")));
        assert_eq!(s.cursor_offset(), 4);
        assert_eq!(s.status(), Some("Not found: xyz"));
        assert_eq!(s.last_search_query(), Some("xyz"));
    }

    #[test]
    fn test_regular_key_stops_on_first_match() {
        let mut s = session("hello\nworld\nhello", 0);
        let mut io = ScriptedIo::with_answer(Some("lo")).keys(&[Key::Char(b'x')]);
        s.search(&mut io);
        assert_eq!(s.cursor_offset(), 3);
        assert_eq!(s.text(), b"hello\nworld\nhello");
        assert_eq!(io.statuses, vec![Some("Ctrl-N to next 1/2".to_string())]);
    }

    #[test]
    fn test_find_next_key_cycles_and_wraps() {
        let mut s = session("hello\nworld\nhello", 0);
        let mut io = ScriptedIo::with_answer(Some("lo")).keys(&[
            Key::FindNext,
            Key::Undo,
            Key::FindNext,
            Key::Char(b'q'),
        ]);
        s.search(&mut io);
        assert_eq!(s.cursor_offset(), 3);
        assert_eq!(
            io.statuses,
            vec![
                Some("Ctrl-N to next 1/2".to_string()),
                Some("Ctrl-N to next 2/2".to_string()),
                Some("Ctrl-N to next 2/2".to_string()),
                Some("Ctrl-N to next 1/2".to_string()),
            ]
        );
        assert!(!s.history().can_undo());
    }

    #[test]
    fn test_escape_stops_cycle() {
        let mut s = session("abab", 0);
        let mut io = ScriptedIo::with_answer(Some("b")).keys(&[Key::FindNext, Key::Escape]);
        s.search(&mut io);
        assert_eq!(s.cursor_offset(), 3);
    }

    #[test]
    fn test_find_next_without_query() {
        let mut s = session("abc", 1);
        s.find_next();
        assert_eq!(s.status(), Some("No previous search"));
        assert_eq!(s.cursor_offset(), 1);
    }

    #[test]
    fn test_find_next_moves_strictly_after_cursor() {
        let mut s = session("hello\nworld\nhello", 0);
        s.search(&mut ScriptedIo::with_answer(Some("lo")));
        assert_eq!(s.cursor_offset(), 3);

        s.find_next();
        assert_eq!(s.cursor_offset(), 15);
        assert_eq!(s.status(), Some("2/2"));

        s.find_next();
        assert_eq!(s.cursor_offset(), 3);
        assert_eq!(s.status(), Some("1/2"));
    }

    #[test]
    fn test_find_next_reports_missing_query() {
        let mut s = session("abc", 0);
        s.search(&mut ScriptedIo::with_answer(Some("zz")));
        s.find_next();
        assert_eq!(s.status(), Some("Not found: zz"));
    }
}
