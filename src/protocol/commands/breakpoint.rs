use crate::protocol::common::hex::decode_hex;

// Breakpoint packets are split up like this:
//
// Z0,addr,kind[;cond_list…][;cmds:persist,cmd_list…]
//  \_________/
//       |
//     BasicBreakpoint
//
// Conditions and commands are not supported, and are ignored if present.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicBreakpoint {
    pub type_: u8,
    pub addr: u32,
    /// architecture dependent
    pub kind: usize,
}

impl BasicBreakpoint {
    pub fn from_slice(body: &[u8]) -> Option<BasicBreakpoint> {
        let mut body = body.splitn(4, |b| matches!(*b, b',' | b';'));
        let type_ = decode_hex(body.next()?).ok()?;
        let addr = decode_hex(body.next()?).ok()?;
        let kind = decode_hex(body.next()?).ok()?;

        Some(BasicBreakpoint { type_, addr, kind })
    }
}
