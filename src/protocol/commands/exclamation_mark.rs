use super::prelude::*;

/// `!`: enable extended mode.
#[derive(Debug)]
pub struct ExclamationMark;

impl<'a> ParseCommand<'a> for ExclamationMark {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(ExclamationMark)
    }
}
