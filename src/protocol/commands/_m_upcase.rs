use super::prelude::*;

/// `M<addr>,<len>:<hex>`: write memory.
#[derive(PartialEq, Eq, Debug)]
pub struct M<'a> {
    pub addr: u32,
    pub val: &'a [u8],
}

impl<'a> ParseCommand<'a> for M<'a> {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        let mut body = body.splitn_mut(3, |b| matches!(*b, b',' | b':'));
        let addr = decode_hex(body.next()?).ok()?;
        let len: usize = decode_hex(body.next()?).ok()?;
        let val = body.next()?;

        // the hex payload must cover exactly `len` bytes
        if val.len() != len.checked_mul(2)? {
            return None;
        }
        let val = decode_hex_buf(val).ok()?;

        Some(M { addr, val })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_write() {
        let mut raw = b"1000,4:deadbeef".to_vec();
        let cmd = M::from_packet(PacketBuf::new(&mut raw)).unwrap();
        assert_eq!(cmd.addr, 0x1000);
        assert_eq!(cmd.val, &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn length_mismatch() {
        let mut raw = b"1000,4:deadbe".to_vec();
        assert!(M::from_packet(PacketBuf::new(&mut raw)).is_none());

        let mut raw = b"1000,2:deadbeef".to_vec();
        assert!(M::from_packet(PacketBuf::new(&mut raw)).is_none());
    }

    #[test]
    fn missing_payload() {
        let mut raw = b"1000,4".to_vec();
        assert!(M::from_packet(PacketBuf::new(&mut raw)).is_none());
    }
}
