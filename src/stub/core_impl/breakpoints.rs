use log::warn;

use super::prelude::*;
use crate::protocol::commands::breakpoint::BasicBreakpoint;

/// `Z0`/`z0`, the only breakpoint type supported.
const SW_BREAKPOINT: u8 = 0;

impl ServerCore {
    pub(crate) fn handle_insert_breakpoint<T: Target>(
        &mut self,
        target: &mut T,
        cmd: BasicBreakpoint,
    ) -> Result<HandlerStatus, Error> {
        if cmd.type_ != SW_BREAKPOINT {
            return Ok(HandlerStatus::Handled);
        }

        match self
            .breakpoints
            .insert(target, self.session.image.as_ref(), cmd.addr)
        {
            Ok(()) => Ok(HandlerStatus::NeedsOk),
            Err(e) => {
                warn!("Breakpoint at {:#010x} refused: {}", cmd.addr, e);
                Err(Error::NonFatal(1))
            }
        }
    }

    pub(crate) fn handle_remove_breakpoint<T: Target>(
        &mut self,
        target: &mut T,
        cmd: BasicBreakpoint,
    ) -> Result<HandlerStatus, Error> {
        if cmd.type_ != SW_BREAKPOINT {
            return Ok(HandlerStatus::Handled);
        }

        match self.breakpoints.remove(target, cmd.addr) {
            Ok(()) => Ok(HandlerStatus::NeedsOk),
            Err(e) => {
                warn!("Breakpoint at {:#010x} not removed: {}", cmd.addr, e);
                Err(Error::NonFatal(1))
            }
        }
    }
}
