use super::prelude::*;

/// `QStartNoAckMode`: stop sending and expecting acknowledgements.
#[derive(Debug)]
pub struct QStartNoAckMode;

impl<'a> ParseCommand<'a> for QStartNoAckMode {
    #[inline(always)]
    fn from_packet(_buf: PacketBuf<'a>) -> Option<Self> {
        Some(QStartNoAckMode)
    }
}
