use super::prelude::*;

/// `T`: query whether a thread is alive. Only one thread exists.
#[derive(Debug)]
pub struct T;

impl<'a> ParseCommand<'a> for T {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(T)
    }
}
