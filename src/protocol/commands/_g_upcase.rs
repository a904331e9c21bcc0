use super::prelude::*;

/// `G<hex>`: write all registers.
#[derive(PartialEq, Eq, Debug)]
pub struct G<'a> {
    pub vals: &'a [u8],
}

impl<'a> ParseCommand<'a> for G<'a> {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        if body.len() % 2 != 0 {
            return None;
        }
        let vals = decode_hex_buf(body).ok()?;
        Some(G { vals })
    }
}
