//! Plain-text search over buffer bytes.

mod finder;

pub use finder::{find_all, find_next, next_match};
