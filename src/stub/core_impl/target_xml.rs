use super::prelude::*;
use crate::arch::target_xml;
use crate::protocol::commands::qXferFeaturesRead;

impl ServerCore {
    pub(crate) fn handle_target_xml(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        cmd: qXferFeaturesRead<'_>,
    ) -> Result<HandlerStatus, Error> {
        if cmd.annex != b"target.xml" {
            return Err(Error::NonFatal(0));
        }

        let xml = target_xml(self.context.cpu().has_fpu()).as_bytes();
        let xml_len = xml.len();

        let start = xml_len.min(cmd.offset);
        let end = xml_len.min(cmd.offset.saturating_add(cmd.length));

        // a window reaching the end of the document is the last chunk
        if end == xml_len {
            res.write(b'l')?;
        } else {
            res.write(b'm')?;
        }

        for b in &xml[start..end] {
            res.write(*b)?;
        }

        Ok(HandlerStatus::Handled)
    }
}
