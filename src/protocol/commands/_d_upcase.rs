use super::prelude::*;

/// `D`: detach.
#[derive(Debug)]
pub struct D;

impl<'a> ParseCommand<'a> for D {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(D)
    }
}
