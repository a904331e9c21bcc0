//! The core [`GdbServer`] type, used to debug a single inferior over a given
//! [`Connection`](crate::conn::Connection).

use log::{info, warn};
use managed::ManagedSlice;

use crate::arch::CpuInfo;
use crate::conn::ConnectionExt;
use crate::context::ContextSwitch;
use crate::target::Process;

mod builder;
mod core_impl;
mod error;
mod session;
mod state_machine;
mod stop_reason;


pub use builder::{
    BuilderError, GdbServerBuilder, ServerFlags, DEFAULT_PACKET_SIZE, MIN_PACKET_SIZE,
};
pub use error::ServerError;
pub use session::{InferiorState, LoopState, StartupCode};

use session::SessionFlags;
use state_machine::Entry;
use ServerError as Error;

/// Debug an inferior using the GDB Remote Serial Protocol over a given
/// connection.
pub struct GdbServer<'a, C: ConnectionExt> {
    conn: C,
    packet_buffer: ManagedSlice<'a, u8>,
    response_buffer: ManagedSlice<'a, u8>,
    core: core_impl::ServerCore,
}

impl<'a, C: ConnectionExt> GdbServer<'a, C> {
    /// Create a [`GdbServerBuilder`] using the provided Connection.
    pub fn builder(conn: C) -> GdbServerBuilder<'a, C> {
        GdbServerBuilder::new(conn)
    }

    /// Run the server until it is told to exit.
    ///
    /// Takes over the machine's exception vectors for the duration of the
    /// call. In extended or multi mode the server keeps serving inferiors one
    /// after the other; otherwise it returns once the first one is gone.
    pub fn run<T: Process>(&mut self, target: &mut T) -> Result<(), Error<T::Error, C::Error>> {
        let cpu = CpuInfo::probe(target);
        self.core.context = ContextSwitch::new(cpu);

        self.conn
            .on_session_start()
            .map_err(Error::ConnectionInit)?;
        self.core
            .context
            .enter_server_context(target, &mut self.core.breakpoints)
            .map_err(Error::TargetError)?;
        info!("Server started");

        let result = self.serve(target);

        self.core.context.leave_server_context(target);
        if self.conn.on_session_end().is_err() {
            warn!("Error while closing the connection");
        }
        info!("Server stopped");
        result
    }

    /// Returns the underlying connection.
    pub fn into_connection(self) -> C {
        self.conn
    }

    fn serve<T: Process>(&mut self, target: &mut T) -> Result<(), Error<T::Error, C::Error>> {
        loop {
            if self.core.session.load_requested() {
                if let Err(e) = self.core.load_inferior(target) {
                    warn!("Could not load inferior {:?}", self.core.session.filename);
                    if self.core.session.startup == StartupCode::Report {
                        self.core.session.startup = StartupCode::Error;
                    } else {
                        // only a command line inferior gets here
                        return Err(e);
                    }
                }
                self.core.session.flags.remove(SessionFlags::LOAD_REQUESTED);
            }

            self.command_loop(target, Entry::Startup)?;
            self.core.breakpoints.clear_all();

            if !self.core.session.keep_serving() {
                return Ok(());
            }
        }
    }
}
