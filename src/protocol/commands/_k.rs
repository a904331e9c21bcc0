use super::prelude::*;

/// `k`: kill the inferior.
#[derive(Debug)]
pub struct k;

impl<'a> ParseCommand<'a> for k {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(k)
    }
}
