pub mod buffer;
pub mod types;

pub use buffer::{ConsoleLine, ConsoleLog, CONSOLE_HEADER};
pub use types::{LogEntry, LogLevel};
