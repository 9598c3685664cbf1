//! 交互式控制台

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::{check_vertical_display, PrintMode, Printer};
