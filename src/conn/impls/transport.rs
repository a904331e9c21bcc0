use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;

use log::info;

use crate::conn::{Connection, ConnectionExt, IoConnection};

/// Which byte transport the server talks to the debugger over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSelector {
    /// Serial port `COMn` (1-based).
    Com(u8),
    /// The server's own standard input/output.
    Stdio,
}

impl Default for TransportSelector {
    fn default() -> Self {
        TransportSelector::Com(1)
    }
}

impl TransportSelector {
    /// Parse a `COMn` device name. A bare `COM` selects `COM1`.
    pub fn from_device(name: &str) -> Option<TransportSelector> {
        let n = name.strip_prefix("COM")?;
        if n.is_empty() {
            return Some(TransportSelector::Com(1));
        }
        match n.parse::<u8>() {
            Ok(n) if n > 0 => Some(TransportSelector::Com(n)),
            _ => None,
        }
    }
}

impl fmt::Display for TransportSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportSelector::Com(n) => write!(f, "COM{}", n),
            TransportSelector::Stdio => write!(f, "stdio"),
        }
    }
}

/// A byte transport chosen once at startup from a [`TransportSelector`].
pub enum Transport {
    /// A serial device, opened read/write.
    Serial(IoConnection<File, File>),
    /// Standard input/output.
    Stdio(IoConnection<io::Stdin, io::Stdout>),
}

impl Transport {
    /// Open the transport named by `selector`.
    ///
    /// `COMn` maps to the host serial device `/dev/ttyS{n-1}`.
    pub fn open(selector: TransportSelector) -> io::Result<Transport> {
        match selector {
            TransportSelector::Com(n) => {
                let path = format!("/dev/ttyS{}", n.saturating_sub(1));
                let rx = OpenOptions::new().read(true).write(true).open(&path)?;
                let tx = rx.try_clone()?;
                info!("Using connection {} ({})", selector, path);
                Ok(Transport::Serial(IoConnection::new(rx, tx)))
            }
            TransportSelector::Stdio => {
                info!("Using connection {}", selector);
                let conn = IoConnection::new(io::stdin(), io::stdout()).with_no_ack(true);
                Ok(Transport::Stdio(conn))
            }
        }
    }
}

impl Connection for Transport {
    type Error = io::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        match self {
            Transport::Serial(c) => c.write(byte),
            Transport::Stdio(c) => c.write(byte),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        match self {
            Transport::Serial(c) => c.write_all(buf),
            Transport::Stdio(c) => c.write_all(buf),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self {
            Transport::Serial(c) => c.flush(),
            Transport::Stdio(c) => c.flush(),
        }
    }
}

impl ConnectionExt for Transport {
    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        match self {
            Transport::Serial(c) => c.read(),
            Transport::Stdio(c) => c.read(),
        }
    }

    fn carrier_detect(&mut self) -> bool {
        match self {
            Transport::Serial(c) => c.carrier_detect(),
            Transport::Stdio(c) => c.carrier_detect(),
        }
    }

    fn quit_requested(&mut self) -> bool {
        match self {
            Transport::Serial(c) => c.quit_requested(),
            Transport::Stdio(c) => c.quit_requested(),
        }
    }

    fn supports_no_ack(&self) -> bool {
        match self {
            Transport::Serial(c) => c.supports_no_ack(),
            Transport::Stdio(c) => c.supports_no_ack(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_com_device() {
        assert_eq!(
            TransportSelector::from_device("COM1"),
            Some(TransportSelector::Com(1))
        );
        assert_eq!(
            TransportSelector::from_device("COM3"),
            Some(TransportSelector::Com(3))
        );
        assert_eq!(
            TransportSelector::from_device("COM"),
            Some(TransportSelector::Com(1))
        );
        assert_eq!(TransportSelector::from_device("COM0"), None);
        assert_eq!(TransportSelector::from_device("LPT1"), None);
    }

    #[test]
    fn selector_display() {
        assert_eq!(TransportSelector::Com(2).to_string(), "COM2");
        assert_eq!(TransportSelector::default().to_string(), "COM1");
    }
}
