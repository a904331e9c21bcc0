use super::prelude::*;

/// `vKill;pid`: kill the inferior. The pid is ignored.
#[derive(Debug)]
pub struct vKill;

impl<'a> ParseCommand<'a> for vKill {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(vKill)
    }
}
