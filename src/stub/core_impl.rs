use log::info;

use crate::breakpoints::BreakpointTable;
use crate::context::ContextSwitch;
use crate::protocol::{Command, ResponseWriter};
use crate::stub::error::InternalError;
use crate::stub::session::{InferiorState, LoopState, Session};
use crate::target::Process;

/// Common imports used by >50% of all handlers.
///
/// Do not clutter this prelude with types only used by a few handlers.
mod prelude {
    pub(super) use crate::protocol::ResponseWriter;
    pub(super) use crate::stub::core_impl::HandlerStatus;
    pub(super) use crate::stub::core_impl::ServerCore;
    pub(super) use crate::stub::error::InternalError as Error;
    pub(super) use crate::target::{Process, Target};
}

mod base;
mod breakpoints;
mod extended_mode;
mod no_ack_mode;
mod resume;
mod section_offsets;
mod single_register_access;
mod target_xml;
mod working_dir;

/// How a command handler wants the command loop to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandlerStatus {
    /// Send whatever was written to the response buffer.
    Handled,
    /// Reply `OK`.
    NeedsOk,
    /// Send the response, but do not wait for the debugger to acknowledge it.
    NoAck,
    /// Stop listening without replying.
    Transition(LoopState),
    /// Send the response, then stop listening.
    ReplyThen(LoopState),
}

/// Everything the server owns except the connection and its buffers.
pub(crate) struct ServerCore {
    pub(crate) session: Session,
    pub(crate) breakpoints: BreakpointTable,
    pub(crate) context: ContextSwitch,
    pub(crate) packet_size: usize,
    pub(crate) supports_no_ack: bool,
}

impl ServerCore {
    pub(crate) fn handle_command<T: Process>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
        cmd: Command<'_>,
    ) -> Result<HandlerStatus, InternalError> {
        match cmd {
            // `handle_X` methods are defined in the `core_impl` submodules
            Command::QuestionMark(_) => self.handle_question_mark(res, target),
            Command::D(_) | Command::H(_) | Command::T(_) => Ok(HandlerStatus::NeedsOk),
            Command::g(_) => self.handle_read_registers(res, target),
            Command::G(cmd) => self.handle_write_registers(target, cmd),
            Command::m(cmd) => self.handle_read_memory(res, target, cmd),
            Command::M(cmd) => self.handle_write_memory(target, cmd),
            Command::p(cmd) => self.handle_read_register(res, target, cmd),
            Command::P(cmd) => self.handle_write_register(target, cmd),
            Command::qSupported(_) => self.handle_q_supported(res),

            Command::ExclamationMark(_) => self.handle_extended_mode(),
            Command::R(_) => self.handle_restart(),
            Command::vRun(cmd) => self.handle_run(cmd),
            Command::vKill(_) | Command::k(_) => Ok(HandlerStatus::Transition(LoopState::Kill)),

            Command::c(cmd) => self.handle_resume(target, cmd.addr, false),
            Command::s(cmd) => self.handle_resume(target, cmd.addr, true),

            Command::Z(cmd) => self.handle_insert_breakpoint(target, cmd.0),
            Command::z(cmd) => self.handle_remove_breakpoint(target, cmd.0),

            Command::qOffsets(_) => self.handle_section_offsets(res),
            Command::QStartNoAckMode(_) => self.handle_no_ack_mode(),
            Command::QSetWorkingDir(cmd) => self.handle_set_working_dir(target, cmd),
            Command::qXferFeaturesRead(cmd) => self.handle_target_xml(res, cmd),

            Command::Unknown(cmd) => {
                info!("Unknown command: {:?}", core::str::from_utf8(cmd));
                Ok(HandlerStatus::Handled)
            }
        }
    }

    /// The debugger pressed ctrl-c while the inferior was already stopped.
    pub(crate) fn handle_interrupt<T: Process>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
    ) -> Result<HandlerStatus, InternalError> {
        if self.session.state == InferiorState::Running {
            self.write_stop(res, target)?;
            Ok(HandlerStatus::Handled)
        } else {
            Ok(HandlerStatus::NeedsOk)
        }
    }

    /// The operator or the debugger asked the server to exit.
    pub(crate) fn handle_kill_server(&mut self) -> HandlerStatus {
        info!("Shutting down the server");
        self.session.shut_down();
        HandlerStatus::Transition(LoopState::Kill)
    }
}
