use alloc::string::String;

use log::{debug, warn};

use super::prelude::*;
use crate::protocol::commands::QSetWorkingDir;

impl ServerCore {
    pub(crate) fn handle_set_working_dir<T: Process>(
        &mut self,
        target: &mut T,
        cmd: QSetWorkingDir<'_>,
    ) -> Result<HandlerStatus, Error> {
        let dir = match cmd.dir {
            Some(dir) => String::from_utf8_lossy(dir).into_owned(),
            None => self.session.workdir.clone(),
        };

        let mut path = dir.as_str();
        if let [drive, b':', ..] = path.as_bytes() {
            target.set_drive(drive.to_ascii_uppercase().wrapping_sub(b'A') as u16);
            path = &path[2..];
        }

        if !path.is_empty() {
            let path = path.replace('/', "\\");
            debug!("Working directory: {}", path);
            if target.set_path(&path).is_err() {
                warn!("Could not change directory to {}", path);
                return Err(Error::NonFatal(1));
            }
        }

        Ok(HandlerStatus::NeedsOk)
    }
}
