use core::ops::Range;

use super::NUM_REGS_CORE;

/// 68k register identifier, as numbered by the debugger's `p`/`P` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum M68kRegId {
    /// Data registers (d0-d7)
    Data(u8),
    /// Address registers (a0-a6)
    Addr(u8),
    /// Stack pointer (a7)
    Sp,
    /// Status register
    Sr,
    /// Program counter
    Pc,
    /// Floating point data registers (fp0-fp7)
    Fp(u8),
    /// Floating point control register
    Fpcr,
    /// Floating point status register
    Fpsr,
    /// Floating point instruction address register
    Fpiar,
}

impl M68kRegId {
    /// Map a raw register number to a register. FPU registers only exist
    /// when `has_fpu` is set.
    pub fn from_raw_id(id: usize, has_fpu: bool) -> Option<Self> {
        let reg = match id {
            0..=7 => Self::Data(id as u8),
            8..=14 => Self::Addr(id as u8 - 8),
            15 => Self::Sp,
            16 => Self::Sr,
            17 => Self::Pc,
            18..=25 if has_fpu => Self::Fp((id - NUM_REGS_CORE) as u8),
            26 if has_fpu => Self::Fpcr,
            27 if has_fpu => Self::Fpsr,
            28 if has_fpu => Self::Fpiar,
            _ => return None,
        };
        Some(reg)
    }

    /// Words of [`M68kRegs`](super::M68kRegs) backing this register.
    pub fn storage(self) -> Range<usize> {
        let start = match self {
            Self::Data(n) => n as usize,
            Self::Addr(n) => 8 + n as usize,
            Self::Sp => 15,
            Self::Sr => 16,
            Self::Pc => 17,
            Self::Fp(n) => {
                let start = NUM_REGS_CORE + n as usize * 3;
                return start..start + 3;
            }
            Self::Fpcr => 42,
            Self::Fpsr => 43,
            Self::Fpiar => 44,
        };
        start..start + 1
    }
}
