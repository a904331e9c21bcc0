use super::prelude::*;

/// `QSetWorkingDir:[hex]`: set the inferior's working directory. An empty
/// directory resets it to the one the inferior was loaded with.
#[derive(Debug)]
pub struct QSetWorkingDir<'a> {
    pub dir: Option<&'a mut [u8]>,
}

impl<'a> ParseCommand<'a> for QSetWorkingDir<'a> {
    #[inline(always)]
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let dir = match decode_hex_buf(buf.into_body()).ok()? {
            [] => None,
            s => Some(s),
        };

        Some(QSetWorkingDir { dir })
    }
}
