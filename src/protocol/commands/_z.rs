use super::prelude::*;

use super::breakpoint::BasicBreakpoint;

/// `z<type>,<addr>,<kind>`: remove a breakpoint.
#[derive(Debug)]
pub struct z(pub BasicBreakpoint);

impl<'a> ParseCommand<'a> for z {
    #[inline(always)]
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        BasicBreakpoint::from_slice(buf.into_body()).map(z)
    }
}
