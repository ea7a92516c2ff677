//! Output formatting for meeting state, availability and minutes.

pub mod console;
pub mod formatter;
pub mod json;
