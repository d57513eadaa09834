//! Text interfaces: the position/action notation shared with the
//! presentation layer and the stdin command parser.

pub mod notation;
pub mod parser;

pub use notation::{format_board_line, format_state, parse_action, parse_state, NotationError};
pub use parser::{parse_command, Command};
