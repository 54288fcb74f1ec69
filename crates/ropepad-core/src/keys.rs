//! Decoding of raw input bytes into logical keys.
//!
//! The terminal delivers one byte per read, or nothing when the read times
//! out. Arrow keys arrive as three-byte escape sequences (`ESC [ A` and so
//! on); a lone `ESC` followed by a timeout is the Escape key itself.
use std::collections::VecDeque;

pub const CTRL_F: u8 = 0x06;
pub const CTRL_N: u8 = 0x0E;
pub const CTRL_Q: u8 = 0x11;
pub const CTRL_R: u8 = 0x12;
pub const CTRL_S: u8 = 0x13;
pub const CTRL_Z: u8 = 0x1A;
pub const ESC: u8 = 0x1B;
pub const RETURN: u8 = 0x0D;
pub const BACKSPACE: u8 = 0x7F;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A logical key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII (32..=126).
    Char(u8),
    Enter,
    Backspace,
    Escape,
    Arrow(Direction),
    Quit,
    Find,
    FindNext,
    Save,
    Undo,
    Redo,
    /// Any other byte; ignored by the editor.
    Other(u8),
}

impl Key {
    /// Maps a single byte that is not part of an escape sequence.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            CTRL_Q => Key::Quit,
            CTRL_F => Key::Find,
            CTRL_N => Key::FindNext,
            CTRL_S => Key::Save,
            CTRL_Z => Key::Undo,
            CTRL_R => Key::Redo,
            RETURN => Key::Enter,
            BACKSPACE => Key::Backspace,
            ESC => Key::Escape,
            32..=126 => Key::Char(byte),
            other => Key::Other(other),
        }
    }

    /// Returns true for printable characters.
    pub fn is_regular(&self) -> bool {
        matches!(self, Key::Char(_))
    }
}

/// A polling source of input bytes.
pub trait ByteSource {
    /// Returns the next byte, or `None` if the read timed out.
    fn read_byte(&mut self) -> Option<u8>;
}

/// A queue of pending bytes. An empty queue behaves like a timeout.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

/// Reads one logical key.
///
/// Returns `None` when the first read times out. Incomplete or unknown
/// escape sequences decode as `Key::Escape`.
pub fn read_key(source: &mut impl ByteSource) -> Option<Key> {
    let first = source.read_byte()?;
    if first != ESC {
        return Some(Key::from_byte(first));
    }

    let Some(second) = source.read_byte() else {
        return Some(Key::Escape);
    };
    let Some(third) = source.read_byte() else {
        return Some(Key::Escape);
    };

    if second == b'[' {
        let direction = match third {
            b'A' => Some(Direction::Up),
            b'B' => Some(Direction::Down),
            b'C' => Some(Direction::Right),
            b'D' => Some(Direction::Left),
            _ => None,
        };
        if let Some(direction) = direction {
            return Some(Key::Arrow(direction));
        }
    }
    Some(Key::Escape)
}
