//! Simulator transport abstraction layer.

use crate::error::Error;
use crate::remote::codec;
use crate::remote::{Message, Tag};
use log::{debug, warn};
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Default simulator remote interface host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default simulator remote interface port.
pub const DEFAULT_PORT: u16 = 41114;

/// Simulator endpoint configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    /// Connect and read timeout, `None` means blocking forever.
    pub timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
        }
    }
}

impl TransportConfig {
    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Trait for simulator command transport.
pub trait Transport {
    /// Send a single command to the simulator and wait for its reply.
    ///
    /// Return `None` if simulator doesn't reply to a command whose reply is optional.
    fn send(&self, tag: Tag, argument: Option<&str>) -> Result<Option<Message>, Error>;
}

/// TCP-based transport, one connection per command.
pub struct TcpTransport {
    config: TransportConfig,
}

impl TcpTransport {
    /// Create transport, zero timeout is treated as no timeout.
    pub fn new(mut config: TransportConfig) -> Self {
        config.timeout = config.timeout.filter(|t| !t.is_zero());
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn connect(&self) -> Result<TcpStream, Error> {
        let endpoint = self.config.endpoint();
        let candidates = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .map_err(|e| {
                warn!(target: "remote", "resolve {endpoint}: {e}");
                Error::Connection(endpoint.clone())
            })?;

        for addr in candidates {
            match self.connect_to(&addr) {
                Ok(stream) => {
                    debug!(target: "remote", "connected to {addr}");
                    stream.set_read_timeout(self.config.timeout)?;
                    stream.set_write_timeout(self.config.timeout)?;
                    return Ok(stream);
                }
                Err(e) => {
                    warn!(target: "remote", "connect to {addr}: {e}");
                }
            }
        }

        Err(Error::Connection(endpoint))
    }

    fn connect_to(&self, addr: &SocketAddr) -> std::io::Result<TcpStream> {
        match self.config.timeout {
            None => TcpStream::connect(addr),
            Some(timeout) => TcpStream::connect_timeout(addr, timeout),
        }
    }
}

impl Transport for TcpTransport {
    fn send(&self, tag: Tag, argument: Option<&str>) -> Result<Option<Message>, Error> {
        let request = Message::request(tag, argument);
        let frame = codec::encode(&request)?;

        let mut stream = self.connect()?;
        debug!(target: "remote", "-> {request}");
        stream.write_all(&frame)?;
        stream.flush()?;

        let Some(payload) = codec::read_frame(&mut stream)? else {
            if tag.expects_address() {
                return Err(Error::Protocol(format!(
                    "connection closed without reply to `{tag}`"
                )));
            }
            debug!(target: "remote", "no reply to `{tag}`");
            return Ok(None);
        };

        let reply = codec::decode(&payload)?;
        debug!(target: "remote", "<- {reply}");
        if reply.is_error() {
            return Err(Error::Simulator(reply.argument.unwrap_or_default()));
        }
        Ok(Some(reply))
    }
}
