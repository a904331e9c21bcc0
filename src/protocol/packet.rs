/// A received packet body ("$" header, "#xx" checksum and escaping already
/// stripped off), handed to the command parsers.
pub struct PacketBuf<'a> {
    buf: &'a mut [u8],
    body_range: core::ops::Range<usize>,
}

impl<'a> PacketBuf<'a> {
    pub fn new(body: &'a mut [u8]) -> PacketBuf<'a> {
        let len = body.len();
        PacketBuf {
            buf: body,
            body_range: 0..len,
        }
    }

    pub fn trim_start_body_bytes(self, n: usize) -> Self {
        let start = (self.body_range.start + n).min(self.body_range.end);
        PacketBuf {
            buf: self.buf,
            body_range: start..self.body_range.end,
        }
    }

    pub fn as_body(&self) -> &[u8] {
        &self.buf[self.body_range.clone()]
    }

    /// Return a mut reference to slice of the packet buffer corresponding to
    /// the current body.
    pub fn into_body(self) -> &'a mut [u8] {
        &mut self.buf[self.body_range]
    }
}
