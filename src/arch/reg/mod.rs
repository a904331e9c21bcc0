//! The 68k register file, as saved in the server's exception frame.

/// `RegId` definitions for the 68k register file.
pub mod id;

mod m68k_core;

pub use m68k_core::{M68kRegs, SR_TRACE};

/// Registers addressable without an FPU: d0-d7, a0-a6, sp, sr, pc.
pub const NUM_REGS_CORE: usize = 18;
/// Registers addressable with an FPU: the core set, fp0-fp7, fpcr, fpsr
/// and fpiar.
pub const NUM_REGS_FPU: usize = 29;
/// 32-bit words in a full exception frame. Each fp register takes three.
pub const NUM_WORDS: usize = NUM_REGS_CORE + 8 * 3 + 3;
