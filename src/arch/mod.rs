//! Motorola 68k support for Atari TOS machines: the exception frame register
//! file, the exception to signal mapping, the target description served to
//! the debugger, and detection of the host's capabilities.

use log::debug;

use crate::target::Target;

pub mod exception;
pub mod reg;
mod target_xml;

pub use target_xml::target_xml;

/// System variable holding a pointer to the cookie jar.
pub const COOKIE_JAR: u32 = 0x5a0;

// Upper bound on the number of cookies walked, in case the jar is corrupt.
const MAX_COOKIES: usize = 256;

/// Packs a 4 character cookie tag into its in-memory representation.
pub const fn cookie_name(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

const COOKIE_CPU: u32 = cookie_name(b"_CPU");
const COOKIE_FPU: u32 = cookie_name(b"_FPU");
const COOKIE_VDO: u32 = cookie_name(b"_VDO");
const COOKIE_MCH: u32 = cookie_name(b"_MCH");

/// Machine description assembled from the TOS cookie jar.
///
/// Missing cookies read as `0`, which describes a plain 68000 ST.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpuInfo {
    /// `_CPU`: processor model (0, 10, 20, 30, 40, 60).
    pub cpu: u32,
    /// `_FPU`: floating point coprocessor flags.
    pub fpu: u32,
    /// `_VDO`: video shifter revision.
    pub vdo: u32,
    /// `_MCH`: machine type.
    pub mch: u32,
}

impl CpuInfo {
    /// Walk the cookie jar. Runs in supervisor mode, since the jar pointer
    /// lives in protected low memory.
    pub fn probe<T: Target>(target: &mut T) -> CpuInfo {
        target.supervisor(|t| {
            let mut info = CpuInfo::default();

            let mut cookie = t.load_u32(COOKIE_JAR);
            if cookie == 0 {
                debug!("No cookie jar, assuming a 68000 ST");
                return info;
            }

            for _ in 0..MAX_COOKIES {
                let tag = t.load_u32(cookie);
                if tag == 0 {
                    break;
                }

                let value = t.load_u32(cookie.wrapping_add(4));
                match tag {
                    COOKIE_CPU => info.cpu = value,
                    COOKIE_FPU => info.fpu = value,
                    COOKIE_VDO => info.vdo = value,
                    COOKIE_MCH => info.mch = value,
                    _ => {}
                }
                cookie = cookie.wrapping_add(8);
            }

            debug!(
                "_CPU={:#x} _FPU={:#x} _VDO={:#x} _MCH={:#x}",
                info.cpu, info.fpu, info.vdo, info.mch
            );
            info
        })
    }

    /// A 68881/2 (or on-chip FPU) is present, and the CPU saves its state in
    /// the exception frame.
    pub fn has_fpu(&self) -> bool {
        self.fpu & (0x1f << 16) != 0 && self.cpu >= 20
    }

    /// STE shifter with the extra fine-scroll registers.
    pub fn has_ste_shifter(&self) -> bool {
        self.vdo == 0x10000
    }

    /// 68000 and 68010 only decode the low 24 address bits.
    pub fn is_24bit_bus(&self) -> bool {
        self.cpu < 20
    }

    /// Number of 32-bit words exchanged with `g`/`G`.
    pub fn frame_words(&self) -> usize {
        if self.has_fpu() {
            reg::NUM_WORDS
        } else {
            reg::NUM_REGS_CORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_flags() {
        let st = CpuInfo::default();
        assert!(!st.has_fpu());
        assert!(st.is_24bit_bus());
        assert_eq!(st.frame_words(), 18);

        let falcon = CpuInfo {
            cpu: 30,
            fpu: 0x0006_0000,
            vdo: 0x0003_0000,
            mch: 0x0003_0000,
        };
        assert!(falcon.has_fpu());
        assert!(!falcon.is_24bit_bus());
        assert!(!falcon.has_ste_shifter());
        assert_eq!(falcon.frame_words(), 45);

        // an FPU on a 68000 is only reachable as a peripheral
        let mega_ste = CpuInfo {
            cpu: 0,
            fpu: 0x0001_0000,
            vdo: 0x0001_0000,
            mch: 0x0001_0010,
        };
        assert!(!mega_ste.has_fpu());
        assert!(mega_ste.has_ste_shifter());
    }

    #[test]
    fn cookie_tags() {
        assert_eq!(cookie_name(b"_CPU"), 0x5f43_5055);
    }
}
