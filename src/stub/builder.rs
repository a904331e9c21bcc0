use alloc::string::{String, ToString};
use core::fmt::{self, Display};

use managed::ManagedSlice;

use crate::arch::CpuInfo;
use crate::breakpoints::BreakpointTable;
use crate::conn::ConnectionExt;
use crate::context::ContextSwitch;

use super::core_impl::ServerCore;
use super::session::{Session, SessionFlags};
use super::GdbServer;

/// Packet buffer size used when none is provided.
pub const DEFAULT_PACKET_SIZE: usize = 4096;

/// Smallest usable buffer: the full register set of an FPU machine has to fit
/// into a single reply.
pub const MIN_PACKET_SIZE: usize = 512;

bitflags::bitflags! {
    /// Server options, as given on the command line.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct ServerFlags: u8 {
        /// Log server activity.
        const DEBUG = 1 << 0;
        /// Also log every packet exchanged with the debugger.
        const DEBUG_REMOTE = 1 << 1;
        /// Keep serving once the inferior is gone. Never loads the inferior
        /// before the debugger asks for it.
        const MULTI = 1 << 2;
        /// Exit after the first inferior, even in extended mode.
        const RUN_ONCE = 1 << 3;
    }
}

/// An error which may occur when building a [`GdbServer`].
#[derive(Debug)]
pub enum BuilderError {
    /// Must provide buffer using `with_packet_buffer` in `#![no_std]` mode.
    MissingPacketBuffer,
    /// A provided buffer is smaller than [`MIN_PACKET_SIZE`].
    PacketBufTooSmall,
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::BuilderError::*;
        match self {
            MissingPacketBuffer => write!(
                f,
                "Must provide buffers using `with_packet_buffer` and `with_response_buffer` in `#![no_std]` mode."
            ),
            PacketBufTooSmall => write!(
                f,
                "Packet buffers must be at least {} bytes long.",
                MIN_PACKET_SIZE
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuilderError {}

/// Helper to construct and customize [`GdbServer`].
pub struct GdbServerBuilder<'a, C: ConnectionExt> {
    conn: C,
    packet_buffer: Option<&'a mut [u8]>,
    response_buffer: Option<&'a mut [u8]>,
    packet_buffer_size: Option<usize>,
    flags: ServerFlags,
    inferior: Option<(String, String)>,
}

impl<'a, C: ConnectionExt> GdbServerBuilder<'a, C> {
    /// Create a new `GdbServerBuilder` using the provided Connection.
    pub fn new(conn: C) -> GdbServerBuilder<'static, C> {
        GdbServerBuilder {
            conn,
            packet_buffer: None,
            response_buffer: None,
            packet_buffer_size: None,
            flags: ServerFlags::empty(),
            inferior: None,
        }
    }

    /// Use a pre-allocated buffer for incoming packets (instead of
    /// heap-allocating). Its length is reported to the debugger as the
    /// maximum packet size.
    ///
    /// _Note:_ This method is _required_ when the `alloc` feature is disabled!
    pub fn with_packet_buffer(mut self, packet_buffer: &'a mut [u8]) -> Self {
        self.packet_buffer = Some(packet_buffer);
        self
    }

    /// Use a pre-allocated buffer for replies.
    ///
    /// _Note:_ This method is _required_ when the `alloc` feature is disabled!
    pub fn with_response_buffer(mut self, response_buffer: &'a mut [u8]) -> Self {
        self.response_buffer = Some(response_buffer);
        self
    }

    /// Size of heap-allocated buffers. Defaults to [`DEFAULT_PACKET_SIZE`].
    pub fn packet_buffer_size(mut self, size: usize) -> Self {
        self.packet_buffer_size = Some(size);
        self
    }

    pub fn with_flags(mut self, flags: ServerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Inferior to debug. It is loaded as soon as the server starts, unless
    /// [`ServerFlags::MULTI`] is set, in which case it is only remembered as
    /// the default for the debugger's run requests.
    pub fn with_inferior(mut self, filename: &str, args: &str) -> Self {
        self.inferior = Some((filename.to_string(), args.to_string()));
        self
    }

    fn buffer(
        buf: Option<&'a mut [u8]>,
        size: Option<usize>,
    ) -> Result<ManagedSlice<'a, u8>, BuilderError> {
        let buf = match buf {
            Some(buf) => ManagedSlice::Borrowed(buf),
            None => {
                cfg_if::cfg_if! {
                    if #[cfg(feature = "alloc")] {
                        use alloc::vec;
                        ManagedSlice::Owned(vec![0; size.unwrap_or(DEFAULT_PACKET_SIZE)])
                    } else {
                        let _ = size;
                        return Err(BuilderError::MissingPacketBuffer);
                    }
                }
            }
        };

        if buf.len() < MIN_PACKET_SIZE {
            return Err(BuilderError::PacketBufTooSmall);
        }
        Ok(buf)
    }

    /// Build the GdbServer, returning an error if something went wrong.
    pub fn build(self) -> Result<GdbServer<'a, C>, BuilderError> {
        let packet_buffer = Self::buffer(self.packet_buffer, self.packet_buffer_size)?;
        let response_buffer = Self::buffer(self.response_buffer, self.packet_buffer_size)?;

        let mut flags = SessionFlags::empty();
        flags.set(SessionFlags::MULTI, self.flags.contains(ServerFlags::MULTI));
        flags.set(
            SessionFlags::RUN_ONCE,
            self.flags.contains(ServerFlags::RUN_ONCE),
        );

        let mut session = Session::new(flags);
        if let Some((filename, args)) = self.inferior {
            session.filename = filename;
            session.args = args;
            if !session.multi() {
                session.flags.insert(SessionFlags::LOAD_REQUESTED);
            }
        }

        let core = ServerCore {
            session,
            breakpoints: BreakpointTable::new(),
            context: ContextSwitch::new(CpuInfo::default()),
            packet_size: packet_buffer.len(),
            supports_no_ack: self.conn.supports_no_ack(),
        };

        Ok(GdbServer {
            conn: self.conn,
            packet_buffer,
            response_buffer,
            core,
        })
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::conn::IoConnection;

    fn conn() -> IoConnection<&'static [u8], Vec<u8>> {
        IoConnection::new(&b""[..], Vec::new())
    }

    #[test]
    fn default_buffers() {
        let server = GdbServerBuilder::new(conn()).build().unwrap();
        assert_eq!(server.core.packet_size, DEFAULT_PACKET_SIZE);
        assert!(!server.core.session.load_requested());
    }

    #[test]
    fn borrowed_buffers() {
        let mut packet = [0; 1024];
        let mut response = [0; 600];
        let server = GdbServerBuilder::new(conn())
            .with_packet_buffer(&mut packet)
            .with_response_buffer(&mut response)
            .build()
            .unwrap();
        assert_eq!(server.core.packet_size, 1024);
    }

    #[test]
    fn tiny_buffers_are_rejected() {
        let mut packet = [0; 64];
        let res = GdbServerBuilder::new(conn())
            .with_packet_buffer(&mut packet)
            .build();
        assert!(matches!(res, Err(BuilderError::PacketBufTooSmall)));
    }

    #[test]
    fn multi_never_loads_directly() {
        let server = GdbServerBuilder::new(conn())
            .with_inferior("hello.tos", "-v")
            .build()
            .unwrap();
        assert!(server.core.session.load_requested());

        let server = GdbServerBuilder::new(conn())
            .with_flags(ServerFlags::MULTI)
            .with_inferior("hello.tos", "-v")
            .build()
            .unwrap();
        assert!(!server.core.session.load_requested());
        assert_eq!(server.core.session.filename, "hello.tos");
    }
}
