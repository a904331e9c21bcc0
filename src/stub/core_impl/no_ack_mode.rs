use super::prelude::*;
use crate::stub::session::SessionFlags;

impl ServerCore {
    pub(crate) fn handle_no_ack_mode(&mut self) -> Result<HandlerStatus, Error> {
        if !self.supports_no_ack {
            return Ok(HandlerStatus::Handled);
        }

        self.session.flags.insert(SessionFlags::NO_ACK);
        Ok(HandlerStatus::NeedsOk)
    }
}
