use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- generic errors --------------------------------------------
    #[error(transparent)]
    IO(#[from] std::io::Error),

    // --------------------------------- protocol errors -------------------------------------------
    #[error("message too large to frame: {0} bytes (max {max})", max = u16::MAX)]
    Encoding(usize),
    #[error("no simulator endpoint reachable at {0}")]
    Connection(String),
    #[error("malformed reply: {0}")]
    Protocol(String),
    #[error("simulator error: {0}")]
    Simulator(String),

    // --------------------------------- input file errors -----------------------------------------
    #[error("malformed file {}: {reason}", .file.display())]
    Format { file: PathBuf, reason: String },

    // --------------------------------- toolchain errors ------------------------------------------
    #[error("environment variable {0} not set")]
    ToolchainNotConfigured(&'static str),
    #[error("translator exit with {0}")]
    Toolchain(ExitStatus),
    #[error("translator executable not found: {0}")]
    ToolchainNotFound(#[from] which::Error),

    // --------------------------------- third party errors ----------------------------------------
    #[error("hook: {0}")]
    Hook(anyhow::Error),
}

impl Error {
    /// Return a hint to an interface - continue debugging after error or stop whole session.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Encoding(_) => false,
            Error::Simulator(_) => false,
            Error::Format { .. } => false,
            Error::Hook(_) => false,

            // transport is gone or out of sync, session can't continue
            Error::IO(_) => true,
            Error::Connection(_) => true,
            Error::Protocol(_) => true,
            Error::ToolchainNotConfigured(_) => true,
            Error::Toolchain(_) => true,
            Error::ToolchainNotFound(_) => true,
        }
    }
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $target: expr, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: $target, "{:#}", e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!(log::warn, "digasm", $res)
    };
    ($res: expr, $target: expr) => {
        $crate::_error!(log::warn, $target, $res)
    };
}

/// Transforms `Result` into `Option` and put error into debug logs if it occurs.
#[macro_export]
macro_rules! muted_error {
    ($res: expr) => {
        $crate::_error!(log::debug, "digasm", $res)
    };
    ($res: expr, $target: expr) => {
        $crate::_error!(log::debug, $target, $res)
    };
}
