//! Commands of interactive debug session.

pub mod parser;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Parsing(String),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Commands that can be typed at the debugger prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Run,
    Step,
}
