//! Software breakpoints, implemented by patching `trap #0` over the
//! instruction at the breakpoint address.

use core::fmt;

use crate::target::{Image, MemoryFault, Target};

/// Maximum number of simultaneously planted breakpoints.
pub const MAX_BREAKPOINTS: usize = 128;

/// `trap #0`
pub const TRAP_0: u16 = 0x4e40;

/// A planted breakpoint and the instruction word it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointEntry {
    pub addr: u32,
    pub saved: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// 68k instructions are word aligned.
    Unaligned,
    /// The address is not inside the inferior's text, data or bss.
    OutOfBounds,
    /// No inferior is loaded.
    NoImage,
    /// Every slot is in use.
    TableFull,
    /// Reading or patching the instruction faulted.
    Memory(MemoryFault),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    /// No breakpoint is planted at the address.
    NotFound,
    /// Restoring the instruction faulted.
    Memory(MemoryFault),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Unaligned => write!(f, "breakpoint address is odd"),
            InsertError::OutOfBounds => write!(f, "breakpoint outside of the inferior"),
            InsertError::NoImage => write!(f, "no inferior loaded"),
            InsertError::TableFull => write!(f, "breakpoint table is full"),
            InsertError::Memory(e) => write!(f, "memory fault at {:#010x}", e.addr),
        }
    }
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveError::NotFound => write!(f, "no breakpoint at that address"),
            RemoveError::Memory(e) => write!(f, "memory fault at {:#010x}", e.addr),
        }
    }
}

fn read_word<T: Target>(target: &mut T, addr: u32) -> Result<u16, MemoryFault> {
    let hi = target.read_byte(addr)?;
    let lo = target.read_byte(addr.wrapping_add(1))?;
    Ok(u16::from_be_bytes([hi, lo]))
}

fn write_word<T: Target>(target: &mut T, addr: u32, word: u16) -> Result<(), MemoryFault> {
    let [hi, lo] = word.to_be_bytes();
    target.write_byte(addr, hi)?;
    target.write_byte(addr.wrapping_add(1), lo)
}

/// Fixed-capacity table of planted breakpoints.
pub struct BreakpointTable {
    entries: [Option<BreakpointEntry>; MAX_BREAKPOINTS],
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakpointTable {
    pub const fn new() -> BreakpointTable {
        BreakpointTable {
            entries: [None; MAX_BREAKPOINTS],
        }
    }

    /// Plant a breakpoint at `addr`, which must be an even address between
    /// the start of `image`'s text and the end of its bss (inclusive).
    ///
    /// Planting a breakpoint where one already exists succeeds without
    /// touching memory again.
    pub fn insert<T: Target>(
        &mut self,
        target: &mut T,
        image: Option<&Image>,
        addr: u32,
    ) -> Result<(), InsertError> {
        let image = image.ok_or(InsertError::NoImage)?;
        if addr & 1 != 0 {
            return Err(InsertError::Unaligned);
        }
        if addr < image.text_base || addr > image.bss_end() {
            return Err(InsertError::OutOfBounds);
        }
        if self.index_of(addr).is_some() {
            return Ok(());
        }

        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.is_none())
            .ok_or(InsertError::TableFull)?;

        let saved = read_word(target, addr).map_err(InsertError::Memory)?;
        if let Err(e) = write_word(target, addr, TRAP_0) {
            // the high byte may already be patched
            let _ = write_word(target, addr, saved);
            return Err(InsertError::Memory(e));
        }

        *slot = Some(BreakpointEntry { addr, saved });
        Ok(())
    }

    /// Remove the breakpoint at `addr`, restoring the original instruction.
    pub fn remove<T: Target>(&mut self, target: &mut T, addr: u32) -> Result<(), RemoveError> {
        let idx = self.index_of(addr).ok_or(RemoveError::NotFound)?;
        let entry = self.entries[idx].take().ok_or(RemoveError::NotFound)?;
        write_word(target, entry.addr, entry.saved).map_err(RemoveError::Memory)
    }

    /// Slot of the breakpoint planted at `addr`, if any.
    pub fn index_of(&self, addr: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, Some(e) if e.addr == addr))
    }

    /// Forget every breakpoint without restoring memory. Used when the
    /// inferior's memory has already been released.
    pub fn clear_all(&mut self) {
        self.entries = [None; MAX_BREAKPOINTS];
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::mock::MockTarget;

    const IMAGE: Image = Image {
        text_base: 0x1000,
        text_len: 0x800,
        data_base: 0x1800,
        data_len: 0x100,
        bss_base: 0x1900,
        bss_len: 0x100,
    };

    fn target() -> MockTarget {
        let mut target = MockTarget::new();
        target.store_u32(0x1000, 0x4e71_4e75); // nop; rts
        target
    }

    #[test]
    fn insert_patches_and_remove_restores() {
        let mut target = target();
        let mut table = BreakpointTable::new();

        table.insert(&mut target, Some(&IMAGE), 0x1002).unwrap();
        assert_eq!(target.peek_u16(0x1002), TRAP_0);
        assert_eq!(target.peek_u16(0x1000), 0x4e71);
        assert_eq!(table.index_of(0x1002), Some(0));
        assert_eq!(table.len(), 1);

        table.remove(&mut target, 0x1002).unwrap();
        assert_eq!(target.peek_u16(0x1002), 0x4e75);
        assert!(table.is_empty());
    }

    #[test]
    fn insert_is_idempotent() {
        let mut target = target();
        let mut table = BreakpointTable::new();

        table.insert(&mut target, Some(&IMAGE), 0x1000).unwrap();
        table.insert(&mut target, Some(&IMAGE), 0x1000).unwrap();
        assert_eq!(table.len(), 1);

        // the saved word is the original instruction, not the trap
        table.remove(&mut target, 0x1000).unwrap();
        assert_eq!(target.peek_u16(0x1000), 0x4e71);
    }

    #[test]
    fn insert_validates_address() {
        let mut target = target();
        let mut table = BreakpointTable::new();

        assert_eq!(
            table.insert(&mut target, Some(&IMAGE), 0x1001),
            Err(InsertError::Unaligned)
        );
        assert_eq!(
            table.insert(&mut target, Some(&IMAGE), 0x0ffe),
            Err(InsertError::OutOfBounds)
        );
        assert_eq!(
            table.insert(&mut target, Some(&IMAGE), 0x1a02),
            Err(InsertError::OutOfBounds)
        );
        assert_eq!(
            table.insert(&mut target, None, 0x1000),
            Err(InsertError::NoImage)
        );
        // the end of bss is still accepted
        assert_eq!(table.insert(&mut target, Some(&IMAGE), 0x1a00), Ok(()));
    }

    #[test]
    fn table_capacity() {
        let mut target = target();
        let mut table = BreakpointTable::new();
        let image = Image {
            bss_len: 0x1000,
            ..IMAGE
        };

        for i in 0..MAX_BREAKPOINTS as u32 {
            table.insert(&mut target, Some(&image), 0x1000 + i * 2).unwrap();
        }
        assert_eq!(
            table.insert(&mut target, Some(&image), 0x1800),
            Err(InsertError::TableFull)
        );

        table.remove(&mut target, 0x1000).unwrap();
        table.insert(&mut target, Some(&image), 0x1800).unwrap();
    }

    #[test]
    fn remove_unknown() {
        let mut target = target();
        let mut table = BreakpointTable::new();
        assert_eq!(table.remove(&mut target, 0x1000), Err(RemoveError::NotFound));
    }

    #[test]
    fn clear_all_leaves_memory_alone() {
        let mut target = target();
        let mut table = BreakpointTable::new();
        table.insert(&mut target, Some(&IMAGE), 0x1000).unwrap();

        table.clear_all();
        assert!(table.is_empty());
        assert_eq!(target.peek_u16(0x1000), TRAP_0);
    }

    #[test]
    fn faulting_insert_is_not_recorded() {
        let mut target = target();
        target.mapped = vec![0..0x1000];
        let mut table = BreakpointTable::new();

        assert_eq!(
            table.insert(&mut target, Some(&IMAGE), 0x1000),
            Err(InsertError::Memory(MemoryFault { addr: 0x1000 }))
        );
        assert!(table.is_empty());
    }
}
