use std::collections::VecDeque;

use ropepad_core::history::Action;
use ropepad_core::{Direction, EditSession, Flow, Interaction, Key, SessionOptions};

/// Answers prompts and key requests from fixed scripts.
#[derive(Default)]
struct Script {
    answers: VecDeque<Option<String>>,
    keys: VecDeque<Key>,
}

impl Script {
    fn answering(answer: &str) -> Self {
        Self {
            answers: VecDeque::from([Some(answer.to_string())]),
            ..Self::default()
        }
    }
}

impl Interaction for Script {
    fn prompt(&mut self, _label: &str) -> Option<String> {
        self.answers.pop_front().flatten()
    }

    fn next_key(&mut self, _session: &mut EditSession) -> Key {
        self.keys.pop_front().unwrap_or(Key::Escape)
    }
}

fn session_at(text: &str, offset: usize) -> EditSession {
    let mut session = EditSession::with_text(text, SessionOptions::default());
    session.set_cursor_offset(offset);
    session
}

#[test]
fn insert_at_end_records_one_action() {
    let mut s = session_at("hello", 5);
    s.insert_text(" world");

    assert_eq!(s.text(), b"hello world");
    assert_eq!(s.cursor_offset(), 11);
    assert_eq!(s.history().undo_stack(), &[Action::insert(5, " world")]);
}

#[test]
fn delete_undo_redo_sequence() {
    let mut s = session_at("hello", 5);
    s.insert_text(" world");

    s.delete_backward();
    assert_eq!(s.text(), b"hello worl");
    assert_eq!(s.cursor_offset(), 10);

    s.undo();
    assert_eq!(s.text(), b"hello world");
    s.undo();
    assert_eq!(s.text(), b"hello");
    s.redo();
    assert_eq!(s.text(), b"hello world");
}

#[test]
fn arrows_cross_a_line_break() {
    let mut s = session_at("one\ntwo\nthree", 3);
    assert_eq!(s.cursor_row(), 1);

    s.move_cursor(Direction::Right);
    assert_eq!((s.cursor_row(), s.cursor_col()), (2, 1));

    s.move_cursor(Direction::Left);
    assert_eq!((s.cursor_row(), s.cursor_col()), (1, 4));
    assert_eq!(s.cursor_offset(), 3);
}

#[test]
fn search_finds_first_occurrence_and_wraps() {
    let mut s = session_at("hello\nworld\nhello", 0);
    s.search(&mut Script::answering("lo"));
    assert_eq!(s.cursor_offset(), 3);

    let mut s = session_at("hello\nworld\nhello", 16);
    s.find_next();
    assert_eq!(s.status(), Some("No previous search"));
    s.search(&mut Script::answering("lo"));
    s.find_next();
    assert_eq!(s.cursor_offset(), 15);
    s.find_next();
    assert_eq!(s.cursor_offset(), 3);
    assert_eq!(s.status(), Some("1/2"));
}

#[test]
fn search_for_absent_text_keeps_cursor() {
    let mut s = session_at("hello\nworld", 7);
    s.search(&mut Script::answering("absent"));
    assert_eq!(s.cursor_offset(), 7);
    assert_eq!(s.status(), Some("Not found: absent"));
    assert_eq!(s.text(), b"hello\nworld");
}

#[test]
fn undoing_every_edit_restores_the_start() {
    let mut s = session_at("start", 5);
    let mut io = Script::default();
    let keys = [
        Key::Char(b'!'),
        Key::Enter,
        Key::Char(b'a'),
        Key::Char(b'b'),
        Key::Backspace,
        Key::Arrow(Direction::Up),
        Key::Backspace,
        Key::Char(b'z'),
        Key::Arrow(Direction::Down),
        Key::Enter,
    ];
    let mut edits = 0;
    for key in keys {
        let before = s.history().undo_len();
        assert_eq!(s.handle_key(key, &mut io), Flow::Continue);
        edits += s.history().undo_len() - before;
    }
    assert_eq!(edits, 8);
    assert_ne!(s.text(), b"start");

    for _ in 0..edits {
        s.undo();
    }
    assert_eq!(s.text(), b"start");
    assert_eq!(s.cursor_offset(), 5);
    assert!(!s.history().can_undo());
}

#[test]
fn redo_cancels_each_undo() {
    let mut s = session_at("abc", 3);
    s.insert_text("def");
    s.set_cursor_offset(2);
    s.delete_backward();
    s.insert_text("XY");

    while s.history().can_undo() {
        let text = s.text();
        let offset = s.cursor_offset();
        s.undo();
        let undone_text = s.text();
        let undone_offset = s.cursor_offset();
        s.redo();
        assert_eq!(s.text(), text);
        assert_eq!(s.cursor_offset(), offset);
        s.undo();
        assert_eq!(s.text(), undone_text);
        assert_eq!(s.cursor_offset(), undone_offset);
    }
    assert_eq!(s.text(), b"abc");
}

#[test]
fn typing_into_an_empty_buffer_starts_without_history() {
    let mut s = EditSession::default();
    let mut io = Script::default();
    for byte in b"hi" {
        s.handle_key(Key::Char(*byte), &mut io);
    }
    assert_eq!(s.text(), b"hi");
    assert_eq!(s.history().undo_stack(), &[Action::insert(1, "i")]);
    assert_eq!(s.handle_key(Key::Quit, &mut io), Flow::Quit);
}
