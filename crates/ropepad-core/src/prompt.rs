//! Single-line prompt used by save-as and search.
use crate::keys::Key;

/// Reads a line of input one key at a time.
///
/// `next_key` polls for a key (`None` means the read timed out) and
/// `redraw(label, input)` is called whenever the visible input changes.
/// Enter accepts the input, Escape cancels immediately and returns `None`.
pub fn read_line(
    label: &str,
    mut next_key: impl FnMut() -> Option<Key>,
    mut redraw: impl FnMut(&str, &str),
) -> Option<String> {
    let mut input = String::new();
    redraw(label, &input);
    loop {
        match next_key() {
            Some(Key::Enter) => return Some(input),
            Some(Key::Escape) => return None,
            Some(Key::Backspace) => {
                if input.pop().is_some() {
                    redraw(label, &input);
                }
            }
            Some(Key::Char(c)) => {
                input.push(char::from(c));
                redraw(label, &input);
            }
            // Timeouts, arrows and control keys are ignored while prompting.
            _ => {}
        }
    }
}
