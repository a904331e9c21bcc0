use super::prelude::*;

/// `g`: read all registers.
#[derive(Debug)]
pub struct g;

impl<'a> ParseCommand<'a> for g {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(g)
    }
}
