use super::prelude::*;
use crate::arch::reg::id::M68kRegId;
use crate::protocol::commands::{p, P};

impl ServerCore {
    pub(crate) fn handle_read_register<T: Target>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
        cmd: p,
    ) -> Result<HandlerStatus, Error> {
        // registers the machine doesn't have read as an empty reply
        let reg = match M68kRegId::from_raw_id(cmd.reg_id, self.context.cpu().has_fpu()) {
            Some(reg) => reg,
            None => return Ok(HandlerStatus::Handled),
        };

        for word in &target.registers().words()[reg.storage()] {
            res.write_u32(*word)?;
        }
        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_write_register<T: Target>(
        &mut self,
        target: &mut T,
        cmd: P<'_>,
    ) -> Result<HandlerStatus, Error> {
        let reg = match M68kRegId::from_raw_id(cmd.reg_id, self.context.cpu().has_fpu()) {
            Some(reg) => reg,
            None => return Ok(HandlerStatus::NeedsOk),
        };

        let storage = reg.storage();
        if cmd.val.len() != storage.len() * 4 {
            return Err(Error::NonFatal(1));
        }

        let words = &mut target.registers().words_mut()[storage];
        for (word, bytes) in words.iter_mut().zip(cmd.val.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Ok(HandlerStatus::NeedsOk)
    }
}
