use super::prelude::*;

use super::breakpoint::BasicBreakpoint;

/// `Z<type>,<addr>,<kind>`: insert a breakpoint.
#[derive(Debug)]
pub struct Z(pub BasicBreakpoint);

impl<'a> ParseCommand<'a> for Z {
    #[inline(always)]
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        BasicBreakpoint::from_slice(buf.into_body()).map(Z)
    }
}
