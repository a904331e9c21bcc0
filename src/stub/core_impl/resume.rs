use super::prelude::*;
use crate::arch::reg::SR_TRACE;
use crate::stub::session::{InferiorState, LoopState};

impl ServerCore {
    /// `c` and `s`.
    pub(crate) fn handle_resume<T: Target>(
        &mut self,
        target: &mut T,
        addr: Option<u32>,
        step: bool,
    ) -> Result<HandlerStatus, Error> {
        // nothing to resume: reply as if resuming was not supported
        if self.session.state == InferiorState::NotLoaded {
            return Ok(HandlerStatus::Handled);
        }

        let regs = target.registers();
        if let Some(addr) = addr {
            regs.set_pc(addr);
        }

        let sr = regs.sr();
        regs.set_sr(if step { sr | SR_TRACE } else { sr & !SR_TRACE });

        Ok(HandlerStatus::Transition(LoopState::ContinueExecution))
    }
}
