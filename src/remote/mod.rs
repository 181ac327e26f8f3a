//! Remote control of a running simulator instance.
//!
//! Every request is a single text message (`tag` or `tag:argument`) sent in a length-prefixed
//! frame over a fresh TCP connection. The simulator answers with a message of the same shape.

pub mod codec;
pub mod transport;

use std::fmt::{Display, Formatter};
use strum_macros::{Display, EnumString, IntoStaticStr};

pub use transport::{TcpTransport, Transport, TransportConfig};

/// Separator between message tag and argument.
pub const SEPARATOR: char = ':';

/// Reply tag used by the simulator to report a failed command.
pub const ERROR_TAG: &str = "error";

/// Commands understood by the simulator.
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    /// Load an image and start free running.
    Start,
    /// Load an image and halt at the entry point.
    Debug,
    /// Run until the next break instruction.
    Run,
    /// Execute a single instruction.
    Step,
    /// Stop the simulation.
    Stop,
    /// Measure the current signal values.
    Measure,
}

impl Tag {
    /// Return true if simulator must answer this command with a program address.
    pub fn expects_address(self) -> bool {
        matches!(self, Tag::Run | Tag::Step)
    }
}

/// A protocol message: tag and an optional single argument.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    pub tag: String,
    pub argument: Option<String>,
}

impl Message {
    pub fn new(tag: impl Into<String>, argument: Option<impl Into<String>>) -> Self {
        Self {
            tag: tag.into(),
            argument: argument.map(Into::into),
        }
    }

    /// Create a request message for a simulator command.
    pub fn request(tag: Tag, argument: Option<&str>) -> Self {
        Self::new(<&'static str>::from(tag), argument)
    }

    /// Return true if message is an error report.
    pub fn is_error(&self) -> bool {
        self.tag == ERROR_TAG
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.argument {
            None => f.write_str(&self.tag),
            Some(arg) => write!(f, "{}{SEPARATOR}{arg}", self.tag),
        }
    }
}
