//! The server's command loop and the transitions between debugger commands,
//! the inferior running, and the inferior raising exceptions.
//!
//! There are two ways into [`GdbServer::command_loop`]:
//!
//! - [`Entry::Startup`]: from the outer serve loop, with no inferior running.
//!   A freshly loaded inferior is sitting at its entry point.
//! - [`Entry::Exception`]: from inside [`Process::run_inferior`], after the
//!   inferior raised a hooked exception. The stop is reported right away.
//!
//! Both end with an exit action deciding what happens once the debugger is
//! done talking.

use log::{debug, error, info, warn};

use super::core_impl::{HandlerStatus, ServerCore};
use super::error::InternalError;
use super::session::{InferiorState, LoopState, SessionFlags, StartupCode};
use super::stop_reason::log_crash_dump;
use super::{Error, GdbServer};
use crate::arch::exception::stop_for_exception;
use crate::common::Signal;
use crate::conn::ConnectionExt;
use crate::protocol::common::hex::nybble_to_hex;
use crate::protocol::{recv_packet, send_packet, Command, Incoming, PacketBuf, ResponseWriter};
use crate::target::{ExceptionAction, Process, RunOutcome, Target};

/// How the command loop was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    Startup,
    Exception { fatal: bool },
}

impl<'a, C: ConnectionExt> GdbServer<'a, C> {
    /// Talk to the debugger until it resumes, kills or (re)starts the
    /// inferior, then carry out whatever it asked for.
    pub(crate) fn command_loop<T: Process>(
        &mut self,
        target: &mut T,
        entry: Entry,
    ) -> Result<ExceptionAction, Error<T::Error, C::Error>> {
        target.set_break_in(false);
        let mut state = LoopState::ListenToGdb;

        match entry {
            Entry::Startup => match self.core.session.startup {
                StartupCode::Silent => {}
                StartupCode::Report => {
                    // the debugger is waiting for the stop at the entry point
                    self.core.session.startup = StartupCode::Silent;
                    state = LoopState::ContinueExecution;
                }
                StartupCode::Error => {
                    self.core.session.startup = StartupCode::Silent;
                    self.send_raw(b"E01", false)
                        .map_err(Error::ConnectionWrite)?;
                }
            },
            Entry::Exception { fatal } => {
                self.send_stop(target)?;
                if fatal {
                    state = LoopState::Kill;
                }
            }
        }

        while state == LoopState::ListenToGdb {
            state = self.handle_next(target)?;
        }

        debug!("Leaving the command loop: {:?}", state);
        self.exit_action(target, state)
    }

    /// Receive one packet, dispatch it and send the reply.
    fn handle_next<T: Process>(
        &mut self,
        target: &mut T,
    ) -> Result<LoopState, Error<T::Error, C::Error>> {
        let GdbServer {
            conn,
            packet_buffer,
            response_buffer,
            core,
        } = self;

        let incoming =
            recv_packet(conn, packet_buffer, !core.session.no_ack()).map_err(Error::ConnectionRead)?;

        let mut res = ResponseWriter::new(response_buffer);
        let status = match incoming {
            Incoming::Interrupt => core.handle_interrupt(&mut res, target),
            Incoming::KillServer => Ok(core.handle_kill_server()),
            Incoming::ConnectionLost => {
                info!("Debugger disconnected");
                Ok(HandlerStatus::Transition(LoopState::Kill))
            }
            Incoming::Packet(len) => {
                match Command::from_packet(PacketBuf::new(&mut packet_buffer[..len])) {
                    Ok(cmd) => core.handle_command(&mut res, target, cmd),
                    Err(e) => {
                        warn!("Malformed packet: {:?}", e);
                        Err(InternalError::NonFatal(1))
                    }
                }
            }
        };

        // the response buffer always holds a short fixed reply
        let (next, wait_for_ack) = match status {
            Ok(HandlerStatus::Handled) => (LoopState::ListenToGdb, true),
            Ok(HandlerStatus::NeedsOk) => {
                let _ = res.write_str("OK");
                (LoopState::ListenToGdb, true)
            }
            Ok(HandlerStatus::NoAck) => (LoopState::ListenToGdb, false),
            Ok(HandlerStatus::Transition(next)) => return Ok(next),
            Ok(HandlerStatus::ReplyThen(next)) => (next, true),
            Err(e) => {
                res.clear();
                let _ = res.write(b'E');
                let _ = res.write_hex(e.code());
                (LoopState::ListenToGdb, true)
            }
        };

        send_packet(
            conn,
            res.as_slice(),
            wait_for_ack && !core.session.no_ack(),
        )
        .map_err(Error::ConnectionWrite)?;
        Ok(next)
    }

    fn send_raw(&mut self, payload: &[u8], skip_ack: bool) -> Result<(), C::Error> {
        let wait_for_ack = !skip_ack && !self.core.session.no_ack();
        send_packet(&mut self.conn, payload, wait_for_ack)
    }

    fn send_stop<T: Target>(&mut self, target: &mut T) -> Result<(), Error<T::Error, C::Error>> {
        let GdbServer {
            conn,
            response_buffer,
            core,
            ..
        } = self;

        let mut res = ResponseWriter::new(response_buffer);
        if core.write_stop(&mut res, target).is_err() {
            warn!("Stop reply truncated");
        }
        send_packet(conn, res.as_slice(), !core.session.no_ack()).map_err(Error::ConnectionWrite)
    }

    fn exit_action<T: Process>(
        &mut self,
        target: &mut T,
        state: LoopState,
    ) -> Result<ExceptionAction, Error<T::Error, C::Error>> {
        let session = &mut self.core.session;
        match state {
            LoopState::Kill => match session.state {
                InferiorState::Loaded => {
                    if let Some(image) = session.image.take() {
                        target.free(image);
                    }
                    session.start_breakpoint = None;
                    session.state = InferiorState::NotLoaded;
                }
                InferiorState::Running => {
                    return Ok(ExceptionAction::Terminate(session.termination_code()))
                }
                InferiorState::NotLoaded => session.flags.remove(SessionFlags::EXTENDED),
            },
            LoopState::ContinueExecution => {
                target.set_break_in(true);
                if session.state == InferiorState::Loaded {
                    self.run_loaded(target)?;
                }
            }
            LoopState::Run => {
                if session.state != InferiorState::NotLoaded {
                    warn!("Run requested with an inferior already loaded");
                }
                session.flags.insert(SessionFlags::LOAD_REQUESTED);
                session.startup = StartupCode::Report;
            }
            LoopState::Restart => {
                if session.state == InferiorState::Running {
                    session.flags.insert(SessionFlags::LOAD_REQUESTED);
                    session.startup = StartupCode::Report;
                    return Ok(ExceptionAction::Terminate(session.termination_code()));
                }
            }
            LoopState::ListenToGdb => {}
        }
        Ok(ExceptionAction::Resume)
    }

    /// Start the loaded inferior and block until it is gone.
    fn run_loaded<T: Process>(&mut self, target: &mut T) -> Result<(), Error<T::Error, C::Error>> {
        // stays in the session while running, breakpoints are checked against it
        let image = match self.core.session.image {
            Some(image) => image,
            None => return Ok(()),
        };

        info!("Starting inferior at {:#010x}", image.text_base);
        self.core.session.state = InferiorState::Running;
        self.core.context.prime_inferior();
        self.core.context.switch_to_inferior(target);

        let mut failure = None;
        let outcome = target.run_inferior(&image, &mut |t: &mut T, vector: u16| {
            match self.on_exception(t, vector) {
                Ok(action) => action,
                Err(e) => {
                    failure = Some(e);
                    ExceptionAction::Terminate(-1)
                }
            }
        });

        self.core.context.switch_to_server(target);
        self.core.session.state = InferiorState::NotLoaded;
        self.core.session.image = None;
        self.core.session.start_breakpoint = None;

        if let Some(e) = failure {
            return Err(e);
        }

        match outcome.map_err(Error::TargetError)? {
            RunOutcome::Exited(code) => {
                info!("Inferior exited with code {}", code);
                let code = code as u8;
                let reply = [b'W', nybble_to_hex(code >> 4), nybble_to_hex(code & 0xf)];
                self.send_raw(&reply, true)
                    .map_err(Error::ConnectionWrite)?;
            }
            RunOutcome::Terminated(code) => {
                info!("Inferior terminated with code {}", code);
                if code == -1 {
                    self.core.session.flags.remove(SessionFlags::EXTENDED);
                }
            }
        }
        Ok(())
    }

    /// Called by the runtime for every exception the inferior raises.
    fn on_exception<T: Process>(
        &mut self,
        target: &mut T,
        vector: u16,
    ) -> Result<ExceptionAction, Error<T::Error, C::Error>> {
        self.core.context.switch_to_server(target);

        let breakpoints = &self.core.breakpoints;
        let (mut signal, code) = stop_for_exception(vector, target.registers(), |addr| {
            breakpoints.index_of(addr).is_some()
        });
        debug!("Exception {} in the inferior: {}", vector, signal);

        let server_text = target.server_text();
        let fatal = server_text.contains(&target.registers().pc());
        if fatal {
            log_crash_dump(target.registers(), server_text);
            signal = Signal::SIGABRT;
        }
        self.core.session.signal = signal;
        self.core.session.code = code;

        let action = self.command_loop(target, Entry::Exception { fatal })?;
        if action == ExceptionAction::Resume {
            self.core.context.switch_to_inferior(target);
        }
        Ok(action)
    }
}

impl ServerCore {
    /// Load the inferior named by the session, leaving it stopped at its
    /// entry point behind a one-shot breakpoint.
    pub(crate) fn load_inferior<T: Process, E>(
        &mut self,
        target: &mut T,
    ) -> Result<(), Error<T::Error, E>> {
        if let Some(image) = self.session.image.take() {
            warn!("Discarding the previously loaded inferior");
            target.free(image);
            self.session.state = InferiorState::NotLoaded;
            self.session.start_breakpoint = None;
        }

        if self.session.filename.is_empty() {
            error!("No inferior given");
            return Err(Error::NoInferior);
        }

        let image = target
            .load(&self.session.filename, &self.session.args, None)
            .map_err(Error::Load)?;
        info!(
            "Loaded {} (text {:#010x}, data {:#010x}, bss {:#010x})",
            self.session.filename, image.text_base, image.data_base, image.bss_base
        );

        self.session.start_breakpoint =
            match self.breakpoints.insert(target, Some(&image), image.text_base) {
                Ok(()) => Some(image.text_base),
                Err(e) => {
                    warn!("Could not plant the start breakpoint: {}", e);
                    None
                }
            };

        self.session.workdir = target.current_dir().unwrap_or_default();
        self.session.image = Some(image);
        self.session.state = InferiorState::Loaded;
        Ok(())
    }
}
