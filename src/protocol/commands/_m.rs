use super::prelude::*;

/// `m<addr>,<len>`: read memory.
#[derive(PartialEq, Eq, Debug)]
pub struct m {
    pub addr: u32,
    pub len: usize,
}

impl<'a> ParseCommand<'a> for m {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        let mut body = body.split(|b| *b == b',');
        let addr = decode_hex(body.next()?).ok()?;
        let len = decode_hex(body.next()?).ok()?;
        if body.next().is_some() {
            return None;
        }

        Some(m { addr, len })
    }
}
