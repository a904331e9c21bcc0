use super::prelude::*;

/// `qSupported`: feature negotiation. The debugger's own feature list is ignored.
#[derive(Debug)]
pub struct qSupported;

impl<'a> ParseCommand<'a> for qSupported {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(qSupported)
    }
}
