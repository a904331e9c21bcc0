use super::prelude::*;

/// `P<n>=<hex>`: write register `n`.
#[derive(PartialEq, Eq, Debug)]
pub struct P<'a> {
    pub reg_id: usize,
    pub val: &'a [u8],
}

impl<'a> ParseCommand<'a> for P<'a> {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        let mut body = body.splitn_mut(2, |&b| b == b'=');
        let reg_id = decode_hex(body.next()?).ok()?;
        let val = body.next()?;
        if val.len() % 2 != 0 {
            return None;
        }
        let val = decode_hex_buf(val).ok()?;
        Some(P { reg_id, val })
    }
}
