use std::io::{self, Read, Write};

use crate::conn::{Connection, ConnectionExt};

/// A [`Connection`] backed by a pair of blocking `std::io` streams.
///
/// Reaching end-of-file on the reader is treated as the carrier dropping. A
/// dropped stream never comes back, so from then on the connection also asks
/// the server to quit.
pub struct IoConnection<R, W> {
    reader: R,
    writer: W,
    connected: bool,
    no_ack: bool,
}

impl<R: Read, W: Write> IoConnection<R, W> {
    /// Wrap a reader/writer pair.
    pub fn new(reader: R, writer: W) -> Self {
        IoConnection {
            reader,
            writer,
            connected: true,
            no_ack: false,
        }
    }

    /// Advertise `QStartNoAckMode` support to the debugger.
    pub fn with_no_ack(mut self, supported: bool) -> Self {
        self.no_ack = supported;
        self
    }

    /// Unwrap the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Connection for IoConnection<R, W> {
    type Error = io::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        if !self.connected {
            return Ok(());
        }
        self.writer.write_all(&[byte])
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        if !self.connected {
            return Ok(());
        }
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.connected {
            return Ok(());
        }
        self.writer.flush()
    }
}

impl<R: Read, W: Write> ConnectionExt for IoConnection<R, W> {
    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.connected {
            return Ok(None);
        }

        let mut buf = [0u8];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.connected = false;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn carrier_detect(&mut self) -> bool {
        self.connected
    }

    fn quit_requested(&mut self) -> bool {
        !self.connected
    }

    fn supports_no_ack(&self) -> bool {
        self.no_ack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_drops_carrier() {
        let mut conn = IoConnection::new(&b"ab"[..], Vec::new());

        assert!(conn.carrier_detect());
        assert_eq!(conn.read().unwrap(), Some(b'a'));
        assert_eq!(conn.read().unwrap(), Some(b'b'));
        assert_eq!(conn.read().unwrap(), None);
        assert!(!conn.carrier_detect());
        assert!(conn.quit_requested());
    }

    #[test]
    fn writes_are_dropped_once_disconnected() {
        let mut conn = IoConnection::new(&b""[..], Vec::new());

        conn.write(b'x').unwrap();
        assert_eq!(conn.read().unwrap(), None);
        conn.write(b'y').unwrap();

        let (_, written) = conn.into_inner();
        assert_eq!(written, b"x");
    }
}
