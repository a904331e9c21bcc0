use super::prelude::*;

/// `R`: restart the inferior.
#[derive(Debug)]
pub struct R;

impl<'a> ParseCommand<'a> for R {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(R)
    }
}
