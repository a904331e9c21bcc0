use super::prelude::*;

impl ServerCore {
    /// The inferior is relocated as a whole, so both text and data move by
    /// its text base. Without an inferior the reply is empty.
    pub(crate) fn handle_section_offsets(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
    ) -> Result<HandlerStatus, Error> {
        if let Some(image) = &self.session.image {
            res.write_str("TextSeg=")?;
            res.write_u32(image.text_base)?;
            res.write_str(";DataSeg=")?;
            res.write_u32(image.text_base)?;
        }
        Ok(HandlerStatus::Handled)
    }
}
