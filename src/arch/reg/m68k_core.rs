use super::{NUM_REGS_CORE, NUM_WORDS};

const SP: usize = 15;
const SR: usize = 16;
const PC: usize = 17;

/// Trace bit in the status register.
pub const SR_TRACE: u32 = 0x8000;

/// 68k registers in exception frame order.
///
/// | words  | registers                           |
/// | ------ | ----------------------------------- |
/// | 0-7    | d0-d7                               |
/// | 8-14   | a0-a6                               |
/// | 15     | sp                                  |
/// | 16     | sr                                  |
/// | 17     | pc                                  |
/// | 18-41  | fp0-fp7, 96-bit extended, 3 words each |
/// | 42-44  | fpcr, fpsr, fpiar                   |
///
/// Source: https://github.com/bminor/binutils-gdb/blob/master/gdb/features/m68k-core.xml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M68kRegs {
    words: [u32; NUM_WORDS],
}

impl Default for M68kRegs {
    fn default() -> Self {
        M68kRegs {
            words: [0; NUM_WORDS],
        }
    }
}

impl M68kRegs {
    pub fn words(&self) -> &[u32; NUM_WORDS] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u32; NUM_WORDS] {
        &mut self.words
    }

    pub fn d(&self, n: usize) -> u32 {
        self.words[n & 7]
    }

    pub fn a(&self, n: usize) -> u32 {
        match n & 7 {
            7 => self.words[SP],
            n => self.words[8 + n],
        }
    }

    pub fn sp(&self) -> u32 {
        self.words[SP]
    }

    pub fn sr(&self) -> u32 {
        self.words[SR]
    }

    pub fn set_sr(&mut self, sr: u32) {
        self.words[SR] = sr;
    }

    pub fn pc(&self) -> u32 {
        self.words[PC]
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.words[PC] = pc;
    }

    /// Emit the first `count` words as big-endian bytes.
    pub fn gdb_serialize(&self, count: usize, mut write_byte: impl FnMut(u8)) {
        for word in self.words[..count.min(NUM_WORDS)].iter() {
            for b in word.to_be_bytes() {
                write_byte(b)
            }
        }
    }

    /// Overwrite the first `count` words from big-endian bytes. `bytes` must
    /// hold exactly `count` words.
    pub fn gdb_deserialize(&mut self, count: usize, bytes: &[u8]) -> Result<(), ()> {
        if count > NUM_WORDS || bytes.len() != count * 4 {
            return Err(());
        }

        for (word, b) in self.words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
        }

        Ok(())
    }

    /// Registers the crash dump prints: everything up to and including pc.
    pub fn core(&self) -> &[u32] {
        &self.words[..NUM_REGS_CORE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_wire_order() {
        let mut regs = M68kRegs::default();
        regs.words_mut()[0] = 0x1234_5678;
        regs.set_pc(0xdead_beef);

        let mut out = Vec::new();
        regs.gdb_serialize(NUM_REGS_CORE, |b| out.push(b));
        assert_eq!(out.len(), NUM_REGS_CORE * 4);
        assert_eq!(&out[..4], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(&out[PC * 4..], &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn deserialize_requires_exact_length() {
        let mut regs = M68kRegs::default();
        let mut bytes = vec![0u8; NUM_REGS_CORE * 4];
        bytes[SR * 4 + 2] = 0x27;
        regs.gdb_deserialize(NUM_REGS_CORE, &bytes).unwrap();
        assert_eq!(regs.sr(), 0x2700);

        assert!(regs.gdb_deserialize(NUM_REGS_CORE, &bytes[1..]).is_err());
        assert!(regs.gdb_deserialize(NUM_WORDS, &bytes).is_err());
    }

    #[test]
    fn a7_is_sp() {
        let mut regs = M68kRegs::default();
        regs.words_mut()[SP] = 0x8000;
        regs.words_mut()[14] = 0x7ff0;
        assert_eq!(regs.a(7), 0x8000);
        assert_eq!(regs.a(6), 0x7ff0);
        assert_eq!(regs.sp(), 0x8000);
    }
}
