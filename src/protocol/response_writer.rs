use managed::ManagedSlice;
use num_traits::PrimInt;

use crate::protocol::common::hex::nybble_to_hex;
use crate::util::managed_vec::{CapacityError, ManagedVec};

/// The reply did not fit into the response buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error;

impl<T> From<CapacityError<T>> for Error {
    fn from(_: CapacityError<T>) -> Self {
        Error
    }
}

/// Accumulates the (unframed) payload of a reply packet.
///
/// Framing, escaping and checksumming happen when the payload is handed to
/// [`send_packet`](super::send_packet::send_packet).
pub struct ResponseWriter<'a, 'b> {
    buf: ManagedVec<'a, 'b, u8>,
}

impl<'a, 'b> ResponseWriter<'a, 'b> {
    /// Creates a new, empty ResponseWriter
    pub fn new(buf: &'b mut ManagedSlice<'a, u8>) -> Self {
        let mut buf = ManagedVec::new(buf);
        buf.clear();
        ResponseWriter { buf }
    }

    /// Discard everything written so far.
    pub fn clear(&mut self) {
        self.buf.clear()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a single raw byte.
    pub fn write(&mut self, byte: u8) -> Result<(), Error> {
        self.buf.push(byte)?;
        Ok(())
    }

    /// Write an entire string.
    pub fn write_str(&mut self, s: &str) -> Result<(), Error> {
        for b in s.as_bytes().iter() {
            self.write(*b)?;
        }
        Ok(())
    }

    /// Write a single byte as a hex string (two ascii chars)
    pub fn write_hex(&mut self, byte: u8) -> Result<(), Error> {
        self.write(nybble_to_hex(byte >> 4))?;
        self.write(nybble_to_hex(byte))
    }

    /// Write a byte-buffer as a hex string (i.e: two ascii chars / byte).
    pub fn write_hex_buf(&mut self, data: &[u8]) -> Result<(), Error> {
        for b in data.iter() {
            self.write_hex(*b)?;
        }
        Ok(())
    }

    /// Write a 32-bit value as exactly eight big-endian hex digits.
    pub fn write_u32(&mut self, val: u32) -> Result<(), Error> {
        self.write_hex_buf(&val.to_be_bytes())
    }

    /// Write a number as a big-endian hex string using the most compact
    /// representation possible (i.e: trimming leading zeros).
    pub fn write_num<D: PrimInt>(&mut self, digit: D) -> Result<(), Error> {
        if digit.is_zero() {
            return self.write(b'0');
        }

        let mask = (D::one() << 4usize) - D::one();
        let bits = core::mem::size_of::<D>() * 8;
        let mut started = false;
        for shift in (0..bits).step_by(4).rev() {
            let nybble = ((digit >> shift) & mask).to_u8().unwrap_or(0);
            if nybble == 0 && !started {
                continue;
            }
            started = true;
            self.write(nybble_to_hex(nybble))?;
        }
        Ok(())
    }
}
