use super::prelude::*;

/// `qOffsets`: query the section offsets of the loaded inferior.
#[derive(Debug)]
pub struct qOffsets;

impl<'a> ParseCommand<'a> for qOffsets {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(qOffsets)
    }
}
