//! Addresses whose contents belong to whichever context owns the machine.
//!
//! While the server is live these locations hold the server's values, so
//! debugger accesses to them are redirected into the inferior's snapshot.

use core::cmp::Ordering;

use crate::arch::CpuInfo;

/// How a region is moved to and from hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Byte,
    Long,
}

/// A run of hardware state and its slot in a [`HardwareSnapshot`].
///
/// [`HardwareSnapshot`]: super::HardwareSnapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub base: u32,
    pub len: u32,
    /// Offset into the snapshot.
    pub offset: usize,
    pub access: Access,
    /// Only present with an STE shifter.
    pub ste_only: bool,
}

impl Region {
    const fn long(base: u32, len: u32, offset: usize) -> Region {
        Region {
            base,
            len,
            offset,
            access: Access::Long,
            ste_only: false,
        }
    }

    const fn byte(base: u32, offset: usize, ste_only: bool) -> Region {
        Region {
            base,
            len: 1,
            offset,
            access: Access::Byte,
            ste_only,
        }
    }

    pub fn present(&self, cpu: &CpuInfo) -> bool {
        !self.ste_only || cpu.has_ste_shifter()
    }

    fn cmp_addr(&self, addr: u32) -> Ordering {
        if addr < self.base {
            Ordering::Greater
        } else if addr - self.base >= self.len {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Size of a [`HardwareSnapshot`](super::HardwareSnapshot).
pub const SNAPSHOT_LEN: usize = 138;

/// Sorted by address.
#[rustfmt::skip]
pub const REGIONS: [Region; 10] = [
    Region::long(0x0000_0060, 32, 0),           // autovectors
    Region::long(0x0000_0100, 64, 32),          // MFP vectors
    Region::long(0x0000_044e, 4, 96),           // _v_bas_ad
    Region::byte(0xffff_8201, 132, false),      // video base high
    Region::byte(0xffff_8203, 133, false),      // video base mid
    Region::byte(0xffff_820a, 134, false),      // sync mode
    Region::byte(0xffff_820d, 136, true),       // video base low
    Region::long(0xffff_8240, 32, 100),         // palette
    Region::byte(0xffff_8260, 135, false),      // shifter mode
    Region::byte(0xffff_8265, 137, true),       // horizontal scroll
];

/// The address the hardware actually decodes. A 68000/68010 ignores the top
/// byte, so `0x00ff8240` and `0xffff8240` are the same register.
pub fn canonical(addr: u32, cpu: &CpuInfo) -> u32 {
    if cpu.is_24bit_bus() {
        ((addr << 8) as i32 >> 8) as u32
    } else {
        addr
    }
}

/// Snapshot offset backing `addr`, or `None` if `addr` is plain memory.
pub fn redirect(addr: u32, cpu: &CpuInfo) -> Option<usize> {
    let addr = canonical(addr, cpu);
    let idx = REGIONS.binary_search_by(|r| r.cmp_addr(addr)).ok()?;
    let region = &REGIONS[idx];
    if !region.present(cpu) {
        return None;
    }
    Some(region.offset + (addr - region.base) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ST: CpuInfo = CpuInfo {
        cpu: 0,
        fpu: 0,
        vdo: 0,
        mch: 0,
    };
    const STE: CpuInfo = CpuInfo {
        cpu: 0,
        fpu: 0,
        vdo: 0x10000,
        mch: 0x10000,
    };
    const TT: CpuInfo = CpuInfo {
        cpu: 30,
        fpu: 0,
        vdo: 0x20000,
        mch: 0x20000,
    };

    #[test]
    fn table_is_sorted_and_fills_the_snapshot() {
        assert!(REGIONS.windows(2).all(|w| w[0].base + w[0].len <= w[1].base));

        let mut covered = [false; SNAPSHOT_LEN];
        for r in REGIONS.iter() {
            for i in 0..r.len as usize {
                assert!(!covered[r.offset + i]);
                covered[r.offset + i] = true;
            }
        }
        assert!(covered.iter().all(|c| *c));
    }

    #[test]
    fn vectors_and_system_variables() {
        assert_eq!(redirect(0x60, &TT), Some(0));
        assert_eq!(redirect(0x7f, &TT), Some(31));
        assert_eq!(redirect(0x80, &TT), None);
        assert_eq!(redirect(0x100, &TT), Some(32));
        assert_eq!(redirect(0x13f, &TT), Some(95));
        assert_eq!(redirect(0x44e, &TT), Some(96));
        assert_eq!(redirect(0x451, &TT), Some(99));
        assert_eq!(redirect(0x452, &TT), None);
        assert_eq!(redirect(0x5f, &TT), None);
    }

    #[test]
    fn video_registers() {
        assert_eq!(redirect(0xffff_8201, &TT), Some(132));
        assert_eq!(redirect(0xffff_8202, &TT), None);
        assert_eq!(redirect(0xffff_8240, &TT), Some(100));
        assert_eq!(redirect(0xffff_825f, &TT), Some(131));
        assert_eq!(redirect(0xffff_8260, &TT), Some(135));
    }

    #[test]
    fn ste_registers_need_an_ste() {
        assert_eq!(redirect(0xffff_820d, &ST), None);
        assert_eq!(redirect(0xffff_8265, &ST), None);
        assert_eq!(redirect(0xffff_820d, &STE), Some(136));
        assert_eq!(redirect(0xffff_8265, &STE), Some(137));
    }

    #[test]
    fn short_addresses_on_a_24bit_bus() {
        assert_eq!(canonical(0x00ff_8240, &ST), 0xffff_8240);
        assert_eq!(canonical(0x0000_1000, &ST), 0x0000_1000);
        assert_eq!(canonical(0x00ff_8240, &TT), 0x00ff_8240);
        assert_eq!(redirect(0x00ff_8240, &ST), Some(100));
        assert_eq!(redirect(0x00ff_8240, &TT), None);
        // the top byte is ignored entirely
        assert_eq!(redirect(0x1200_0060, &ST), Some(0));
    }
}
