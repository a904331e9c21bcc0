use super::prelude::*;
use crate::protocol::commands::{m, G, M};
use crate::stub::session::{InferiorState, LoopState};

impl ServerCore {
    pub(crate) fn handle_question_mark<T: Process>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
    ) -> Result<HandlerStatus, Error> {
        let handler_status = match self.session.state {
            InferiorState::NotLoaded if self.session.multi() => {
                HandlerStatus::Transition(LoopState::Run)
            }
            InferiorState::NotLoaded => {
                // nothing to debug, so claim that the process already exited
                res.write_str("W00")?;
                if self.session.extended() {
                    HandlerStatus::NoAck
                } else {
                    HandlerStatus::ReplyThen(LoopState::Kill)
                }
            }
            InferiorState::Running => {
                self.write_stop(res, target)?;
                HandlerStatus::Handled
            }
            // the stop reply is sent once the inferior hits its entry point
            InferiorState::Loaded => HandlerStatus::Transition(LoopState::ContinueExecution),
        };
        Ok(handler_status)
    }

    pub(crate) fn handle_q_supported(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
    ) -> Result<HandlerStatus, Error> {
        res.write_str("PacketSize=")?;
        res.write_num(self.packet_size)?;
        res.write_str(concat!(";swbreak+", ";qXfer:features:read+"))?;

        if self.supports_no_ack {
            res.write_str(";QStartNoAckMode+")?;
        }

        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_read_registers<T: Target>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
    ) -> Result<HandlerStatus, Error> {
        let words = self.context.cpu().frame_words();

        let mut err = Ok(());
        target.registers().gdb_serialize(words, |byte| {
            if err.is_ok() {
                err = res.write_hex(byte);
            }
        });
        err?;

        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_write_registers<T: Target>(
        &mut self,
        target: &mut T,
        cmd: G<'_>,
    ) -> Result<HandlerStatus, Error> {
        let words = self.context.cpu().frame_words();
        target
            .registers()
            .gdb_deserialize(words, cmd.vals)
            .map_err(|_| Error::NonFatal(1))?;
        Ok(HandlerStatus::NeedsOk)
    }

    pub(crate) fn handle_read_memory<T: Target>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
        cmd: m,
    ) -> Result<HandlerStatus, Error> {
        for i in 0..cmd.len {
            let addr = cmd.addr.wrapping_add(i as u32);
            let byte = self
                .context
                .read_inferior_byte(target, addr)
                .map_err(|_| Error::NonFatal(1))?;
            res.write_hex(byte)?;
        }
        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_write_memory<T: Target>(
        &mut self,
        target: &mut T,
        cmd: M<'_>,
    ) -> Result<HandlerStatus, Error> {
        for (i, val) in cmd.val.iter().enumerate() {
            let addr = cmd.addr.wrapping_add(i as u32);
            self.context
                .write_inferior_byte(target, addr, *val)
                .map_err(|_| Error::NonFatal(1))?;
        }
        Ok(HandlerStatus::NeedsOk)
    }
}
