//! Stdio adapter - the tool server spoken over stdin/stdout.

mod json_lines;
mod messages;

pub use json_lines::JsonLinesServer;
pub use messages::{ClientMessage, ServerMessage};
