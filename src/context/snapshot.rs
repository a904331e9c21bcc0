use crate::arch::CpuInfo;
use crate::target::Target;

use super::redirect::{Access, REGIONS, SNAPSHOT_LEN};

/// Saved copy of the vectors, system variable and video registers that the
/// server and the inferior each expect to own.
///
/// Longs are stored big-endian, so the bytes line up with what a byte-wise
/// memory read of the hardware would return.
#[derive(Clone, PartialEq, Eq)]
pub struct HardwareSnapshot {
    bytes: [u8; SNAPSHOT_LEN],
}

impl core::fmt::Debug for HardwareSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HardwareSnapshot").finish_non_exhaustive()
    }
}

impl Default for HardwareSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareSnapshot {
    pub const fn new() -> HardwareSnapshot {
        HardwareSnapshot {
            bytes: [0; SNAPSHOT_LEN],
        }
    }

    /// Copy live hardware state into the snapshot. Must run in supervisor
    /// mode.
    pub fn capture<T: Target>(&mut self, target: &mut T, cpu: &CpuInfo) {
        for region in REGIONS.iter().filter(|r| r.present(cpu)) {
            let slot = &mut self.bytes[region.offset..][..region.len as usize];
            match region.access {
                Access::Byte => slot[0] = target.load_u8(region.base),
                Access::Long => {
                    for (i, chunk) in slot.chunks_exact_mut(4).enumerate() {
                        let val = target.load_u32(region.base + i as u32 * 4);
                        chunk.copy_from_slice(&val.to_be_bytes());
                    }
                }
            }
        }
    }

    /// Make the snapshot live again. Must run in supervisor mode.
    pub fn restore<T: Target>(&self, target: &mut T, cpu: &CpuInfo) {
        for region in REGIONS.iter().filter(|r| r.present(cpu)) {
            let slot = &self.bytes[region.offset..][..region.len as usize];
            match region.access {
                Access::Byte => target.store_u8(region.base, slot[0]),
                Access::Long => {
                    for (i, chunk) in slot.chunks_exact(4).enumerate() {
                        let val = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                        target.store_u32(region.base + i as u32 * 4, val);
                    }
                }
            }
        }
    }

    pub fn byte(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    pub fn set_byte(&mut self, offset: usize, val: u8) {
        self.bytes[offset] = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::mock::MockTarget;

    const STE: CpuInfo = CpuInfo {
        cpu: 0,
        fpu: 0,
        vdo: 0x10000,
        mch: 0x10000,
    };

    #[test]
    fn capture_then_restore() {
        let mut target = MockTarget::new();
        target.store_u32(0x70, 0x00e0_1234);
        target.store_u32(0x134, 0x00fc_5678);
        target.store_u32(0x44e, 0x003f_8000);
        target.store_u8(0xffff_8260, 1);
        target.store_u8(0xffff_8265, 7);
        target.store_u32(0xffff_8240, 0x0777_0700);

        let mut snap = HardwareSnapshot::new();
        snap.capture(&mut target, &STE);
        assert_eq!(snap.byte(0x70 - 0x60 + 3), 0x34);
        assert_eq!(snap.byte(96), 0x00);
        assert_eq!(snap.byte(97), 0x3f);
        assert_eq!(snap.byte(135), 1);
        assert_eq!(snap.byte(137), 7);
        assert_eq!(snap.byte(101), 0x77);

        target.store_u32(0x70, 0);
        target.store_u8(0xffff_8260, 2);
        target.store_u32(0xffff_8240, 0);

        snap.restore(&mut target, &STE);
        assert_eq!(target.load_u32(0x70), 0x00e0_1234);
        assert_eq!(target.peek(0xffff_8260), 1);
        assert_eq!(target.load_u32(0xffff_8240), 0x0777_0700);
    }

    #[test]
    fn ste_registers_are_left_alone_on_an_st() {
        let mut target = MockTarget::new();
        target.store_u8(0xffff_820d, 0x42);

        let mut snap = HardwareSnapshot::new();
        snap.capture(&mut target, &CpuInfo::default());
        assert_eq!(snap.byte(136), 0);

        snap.set_byte(136, 0x99);
        snap.restore(&mut target, &CpuInfo::default());
        assert_eq!(target.peek(0xffff_820d), 0x42);
    }
}
