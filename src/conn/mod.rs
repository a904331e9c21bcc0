//! Traits to perform in-order, serial, byte-wise I/O.

mod impls;

#[cfg(feature = "std")]
pub use impls::io::IoConnection;
#[cfg(feature = "std")]
pub use impls::transport::{Transport, TransportSelector};

/// A trait to perform in-order, serial, byte-wise output.
///
/// When the `std` feature is enabled, this trait is implemented for
/// [`IoConnection`] and [`Transport`].
pub trait Connection {
    /// Transport-specific error type.
    type Error;

    /// Write a single byte.
    ///
    /// Writing while the line is down must not block. Implementations are
    /// expected to silently drop the byte instead.
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write the entire buffer, blocking until complete.
    ///
    /// This method's default implementation calls `self.write()` on each byte
    /// in the buffer.
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        for b in buf {
            self.write(*b)?;
        }
        Ok(())
    }

    /// Flush this Connection, ensuring that all intermediately buffered
    /// contents reach their destination.
    ///
    /// _Note:_ Not all `Connection`s have internal buffering (e.g: writing data
    /// to a UART TX register with FIFOs disabled). In these cases, it's fine to
    /// simply return `Ok(())`.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Called once when the server starts, _before_ any GDB packets have been
    /// sent/received. Serial lines typically raise DTR and drain stale input
    /// here.
    ///
    /// This method's default implementation is a no-op.
    fn on_session_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once when the server shuts down.
    ///
    /// This method's default implementation is a no-op.
    fn on_session_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Extends [`Connection`] with the input side of a serial line.
pub trait ConnectionExt: Connection {
    /// Read a single byte, blocking until one arrives.
    ///
    /// Returns `Ok(None)` if the connection was lost (carrier dropped) or the
    /// operator pressed the server's quit key while waiting.
    fn read(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Whether a debugger is currently connected (e.g: the DCD line of a
    /// serial port is asserted).
    fn carrier_detect(&mut self) -> bool;

    /// Polled while waiting for a connection. Returning `true` shuts the
    /// server down.
    ///
    /// This method's default implementation never requests a shutdown.
    fn quit_requested(&mut self) -> bool {
        false
    }

    /// Whether the line is reliable enough to offer `QStartNoAckMode` to the
    /// debugger.
    fn supports_no_ack(&self) -> bool {
        false
    }
}
