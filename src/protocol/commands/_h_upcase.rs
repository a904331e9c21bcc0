use super::prelude::*;

/// `H`: select a thread for subsequent operations. Only one thread exists.
#[derive(Debug)]
pub struct H;

impl<'a> ParseCommand<'a> for H {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(H)
    }
}
