use alloc::string::String;

use log::{debug, warn};

use super::prelude::*;
use crate::protocol::commands::vRun;
use crate::stub::session::{InferiorState, LoopState, SessionFlags};

impl ServerCore {
    pub(crate) fn handle_extended_mode(&mut self) -> Result<HandlerStatus, Error> {
        self.session.flags.insert(SessionFlags::EXTENDED);
        Ok(HandlerStatus::NeedsOk)
    }

    pub(crate) fn handle_restart(&mut self) -> Result<HandlerStatus, Error> {
        let state = match self.session.state {
            InferiorState::Running => LoopState::Restart,
            _ => LoopState::Run,
        };
        Ok(HandlerStatus::Transition(state))
    }

    pub(crate) fn handle_run(&mut self, cmd: vRun<'_>) -> Result<HandlerStatus, Error> {
        if self.session.state != InferiorState::NotLoaded {
            warn!("Only one inferior at a time is supported");
            return Err(Error::NonFatal(1));
        }

        // an empty filename re-runs the previous inferior
        if let Some(filename) = cmd.filename {
            self.session.filename = String::from_utf8_lossy(filename).into_owned();
        }

        let mut args = String::new();
        for arg in cmd.args.into_iter() {
            if !args.is_empty() {
                args.push(' ');
            }
            args.push_str(&String::from_utf8_lossy(arg));
        }
        self.session.args = args;

        debug!(
            "Run: inferior {:?}, args {:?}",
            self.session.filename, self.session.args
        );
        Ok(HandlerStatus::Transition(LoopState::Run))
    }
}
