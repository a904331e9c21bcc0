//! Mapping from 68k exception vector numbers to the signals reported to the
//! debugger.

use crate::arch::reg::M68kRegs;
use crate::common::{SigCode, Signal};

pub const BUS_ERROR: u16 = 2;
pub const ADDRESS_ERROR: u16 = 3;
pub const ILLEGAL_INSTRUCTION: u16 = 4;
pub const ZERO_DIVIDE: u16 = 5;
pub const TRAPV: u16 = 7;
pub const PRIVILEGE_VIOLATION: u16 = 8;
pub const TRACE: u16 = 9;
pub const NMI: u16 = 31;
/// `trap #0`, the software breakpoint.
pub const TRAP_0: u16 = 32;
/// MFP receive buffer full: the debugger sent a byte (ctrl-c) while the
/// inferior was running.
pub const SERIAL_INPUT: u16 = 0x4c;

/// Length of the `trap #0` instruction.
const TRAP_LEN: u32 = 2;

/// Translate an exception vector into a `(signal, code)` pair.
#[rustfmt::skip]
pub fn map_exception(vector: u16) -> (Signal, SigCode) {
    match vector {
        BUS_ERROR           => (Signal::SIGBUS,  SigCode::BUS_ADRALN),
        ADDRESS_ERROR       => (Signal::SIGBUS,  SigCode::BUS_ADRERR),
        ILLEGAL_INSTRUCTION => (Signal::SIGILL,  SigCode::ILL_ILLOPC),
        ZERO_DIVIDE         => (Signal::SIGFPE,  SigCode::FPE_INTDIV),
        TRAPV               => (Signal::SIGFPE,  SigCode::FPE_INTOVF),
        PRIVILEGE_VIOLATION => (Signal::SIGILL,  SigCode::ILL_PRVOPC),
        TRACE               => (Signal::SIGTRAP, SigCode::TRAP_TRACE),
        NMI                 => (Signal::SIGBUS,  SigCode::BUS_OBJERR),
        TRAP_0              => (Signal::SIGTRAP, SigCode::TRAP_BRKPT),
        // FPCP exceptions
        48 => (Signal::SIGFPE, SigCode::FPE_FLTINV), // branch or set on unordered
        49 => (Signal::SIGFPE, SigCode::FPE_FLTRES), // inexact result
        50 => (Signal::SIGFPE, SigCode::FPE_FLTDIV), // divide by zero
        51 => (Signal::SIGFPE, SigCode::FPE_FLTUND), // underflow
        52 => (Signal::SIGFPE, SigCode::FPE_FLTINV), // operand error
        53 => (Signal::SIGFPE, SigCode::FPE_FLTOVF), // overflow
        54 => (Signal::SIGFPE, SigCode::FPE_FLTINV), // signaling NaN
        SERIAL_INPUT        => (Signal::SIGINT,  SigCode::NONE),
        _                   => (Signal::SIGINT,  SigCode::NONE),
    }
}

/// Map `vector` and fix up the saved pc.
///
/// A `trap #0` leaves pc just past the trap. If the trap was planted by the
/// debugger, pc is rewound onto the patched instruction so that it runs once
/// the breakpoint is removed. A `trap #0` compiled into the inferior is left
/// alone.
pub fn stop_for_exception(
    vector: u16,
    regs: &mut M68kRegs,
    is_breakpoint: impl FnOnce(u32) -> bool,
) -> (Signal, SigCode) {
    let stop = map_exception(vector);
    if vector == TRAP_0 {
        let trap_addr = regs.pc().wrapping_sub(TRAP_LEN);
        if is_breakpoint(trap_addr) {
            regs.set_pc(trap_addr);
        }
    }
    stop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_exceptions() {
        assert_eq!(map_exception(2), (Signal::SIGBUS, SigCode::BUS_ADRALN));
        assert_eq!(map_exception(3), (Signal::SIGBUS, SigCode::BUS_ADRERR));
        assert_eq!(map_exception(4), (Signal::SIGILL, SigCode::ILL_ILLOPC));
        assert_eq!(map_exception(5), (Signal::SIGFPE, SigCode::FPE_INTDIV));
        assert_eq!(map_exception(7), (Signal::SIGFPE, SigCode::FPE_INTOVF));
        assert_eq!(map_exception(8), (Signal::SIGILL, SigCode::ILL_PRVOPC));
        assert_eq!(map_exception(9), (Signal::SIGTRAP, SigCode::TRAP_TRACE));
        assert_eq!(map_exception(31), (Signal::SIGBUS, SigCode::BUS_OBJERR));
        assert_eq!(map_exception(32), (Signal::SIGTRAP, SigCode::TRAP_BRKPT));
    }

    #[test]
    fn fpu_exceptions() {
        let codes: Vec<_> = (48..=54).map(|v| map_exception(v)).collect();
        assert!(codes.iter().all(|(sig, _)| *sig == Signal::SIGFPE));
        assert_eq!(
            codes.iter().map(|(_, code)| code.0).collect::<Vec<_>>(),
            [14, 10, 11, 12, 14, 13, 14]
        );
    }

    #[test]
    fn everything_else_is_an_interrupt() {
        for vector in [0x4c, 6, 33, 47, 55, 255] {
            assert_eq!(map_exception(vector), (Signal::SIGINT, SigCode::NONE));
        }
    }

    #[test]
    fn breakpoint_pc_is_rewound() {
        let mut regs = M68kRegs::default();
        regs.set_pc(0x1002);
        let stop = stop_for_exception(TRAP_0, &mut regs, |addr| addr == 0x1000);
        assert_eq!(stop, (Signal::SIGTRAP, SigCode::TRAP_BRKPT));
        assert_eq!(regs.pc(), 0x1000);
    }

    #[test]
    fn compiled_in_trap_keeps_pc() {
        let mut regs = M68kRegs::default();
        regs.set_pc(0x2002);
        stop_for_exception(TRAP_0, &mut regs, |_| false);
        assert_eq!(regs.pc(), 0x2002);

        // only trap #0 rewinds
        regs.set_pc(0x1002);
        stop_for_exception(TRACE, &mut regs, |_| true);
        assert_eq!(regs.pc(), 0x1002);
    }
}
