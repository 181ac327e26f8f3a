//! Frame codec: `u16` big-endian payload length followed by UTF-8 message text.

use crate::error::Error;
use crate::remote::{Message, SEPARATOR};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{ErrorKind, Read};

/// Size of frame length prefix.
pub const PREFIX_LEN: usize = 2;

/// Encode message into a single frame.
pub fn encode(message: &Message) -> Result<Bytes, Error> {
    let payload = message.to_string();
    let len = u16::try_from(payload.len()).map_err(|_| Error::Encoding(payload.len()))?;

    let mut frame = BytesMut::with_capacity(PREFIX_LEN + payload.len());
    frame.put_u16(len);
    frame.put_slice(payload.as_bytes());
    Ok(frame.freeze())
}

/// Decode message from frame payload (without length prefix).
///
/// Payload is split at separators, only the first two fields are meaningful,
/// the rest are ignored.
pub fn decode(payload: &[u8]) -> Result<Message, Error> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| Error::Protocol(format!("payload is not a valid utf-8 text: {e}")))?;

    let mut fields = text.split(SEPARATOR);
    let tag = fields.next().unwrap_or_default();
    Ok(Message::new(tag, fields.next()))
}

/// Read exactly one frame payload from a stream.
///
/// Return `None` if stream closed before first byte of a frame.
pub fn read_frame(input: &mut impl Read) -> Result<Option<Vec<u8>>, Error> {
    let mut prefix = [0u8; PREFIX_LEN];
    let mut filled = 0;
    while filled < PREFIX_LEN {
        match input.read(&mut prefix[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(Error::Protocol(format!(
                    "connection closed after {filled} of {PREFIX_LEN} length prefix bytes"
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let len = (&prefix[..]).get_u16() as usize;
    let mut payload = vec![0u8; len];
    input.read_exact(&mut payload).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            Error::Protocol(format!("connection closed before {len} payload bytes received"))
        }
        _ => Error::IO(e),
    })?;

    Ok(Some(payload))
}
