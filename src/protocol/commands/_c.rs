use super::prelude::*;

/// `c[addr]`: continue, optionally resuming at `addr`.
#[derive(PartialEq, Eq, Debug)]
pub struct c {
    pub addr: Option<u32>,
}

impl<'a> ParseCommand<'a> for c {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        if body.is_empty() {
            return Some(c { addr: None });
        }
        let addr = decode_hex(body).ok()?;
        Some(c { addr: Some(addr) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_and_without_addr() {
        let mut raw = b"".to_vec();
        assert_eq!(c::from_packet(PacketBuf::new(&mut raw)), Some(c { addr: None }));

        let mut raw = b"1000".to_vec();
        assert_eq!(
            c::from_packet(PacketBuf::new(&mut raw)),
            Some(c { addr: Some(0x1000) })
        );

        let mut raw = b"10g0".to_vec();
        assert_eq!(c::from_packet(PacketBuf::new(&mut raw)), None);
    }
}
