//! An in-memory machine for exercising the server without hardware.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::arch::reg::M68kRegs;
use crate::arch::COOKIE_JAR;
use crate::target::{ExceptionAction, Image, MemoryFault, Process, RunOutcome, Target};

pub const SERVER_TEXT: Range<u32> = 0x0008_0000..0x0008_4000;
const COOKIES_AT: u32 = 0x0000_0800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    NotFound(String),
    HookFailed,
}

/// One exception raised by the inferior while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raise {
    pub vector: u16,
    /// pc as saved in the exception frame.
    pub pc: u32,
}

pub struct MockTarget {
    pub regs: M68kRegs,
    pub mem: BTreeMap<u32, u8>,
    pub mapped: Vec<Range<u32>>,

    pub hooked: bool,
    pub fail_hook: bool,
    pub break_in: bool,
    /// `break_in` as it was each time the inferior was started.
    pub break_in_at_run: Vec<bool>,
    pub cache_flushes: usize,
    pub supervisor_calls: usize,
    in_supervisor: bool,
    /// Vector hooking and cache flushes done outside of `supervisor`.
    pub unprivileged_ops: usize,

    pub programs: BTreeMap<String, Image>,
    pub script: VecDeque<Raise>,
    pub exit_code: i32,
    pub loads: Vec<(String, String)>,
    pub freed: Vec<Image>,
    pub runs: usize,
    /// Actions returned by the server, one per raised exception.
    pub actions: Vec<ExceptionAction>,

    pub drive: u16,
    pub path: String,
}

impl MockTarget {
    pub fn new() -> MockTarget {
        MockTarget {
            regs: M68kRegs::default(),
            mem: BTreeMap::new(),
            mapped: vec![0..0x0040_0000, 0xffff_8000..0xffff_ffff],

            hooked: false,
            fail_hook: false,
            break_in: false,
            break_in_at_run: Vec::new(),
            cache_flushes: 0,
            supervisor_calls: 0,
            in_supervisor: false,
            unprivileged_ops: 0,

            programs: BTreeMap::new(),
            script: VecDeque::new(),
            exit_code: 0,
            loads: Vec::new(),
            freed: Vec::new(),
            runs: 0,
            actions: Vec::new(),

            drive: 2,
            path: "\\".to_string(),
        }
    }

    /// Register a loadable program with its text at `text_base`.
    pub fn with_program(mut self, name: &str, text_base: u32) -> MockTarget {
        let image = Image {
            text_base,
            text_len: 0x1000,
            data_base: text_base + 0x1000,
            data_len: 0x100,
            bss_base: text_base + 0x1100,
            bss_len: 0x100,
        };
        self.programs.insert(name.to_string(), image);
        self
    }

    /// Lay out a cookie jar in low memory.
    pub fn with_cookies(mut self, cookies: &[(&[u8; 4], u32)]) -> MockTarget {
        self.store_u32(COOKIE_JAR, COOKIES_AT);
        let mut at = COOKIES_AT;
        for (tag, value) in cookies {
            self.store_u32(at, u32::from_be_bytes(**tag));
            self.store_u32(at + 4, *value);
            at += 8;
        }
        self.store_u32(at, 0);
        self
    }

    pub fn raise(&mut self, vector: u16, pc: u32) {
        self.script.push_back(Raise { vector, pc });
    }

    pub fn peek(&self, addr: u32) -> u8 {
        self.mem.get(&addr).copied().unwrap_or(0)
    }

    pub fn peek_u16(&self, addr: u32) -> u16 {
        u16::from_be_bytes([self.peek(addr), self.peek(addr + 1)])
    }

    fn privileged(&mut self) {
        if !self.in_supervisor {
            self.unprivileged_ops += 1;
        }
    }

    fn is_mapped(&self, addr: u32) -> bool {
        self.mapped.iter().any(|r| r.contains(&addr))
    }
}

impl Target for MockTarget {
    type Error = MockError;

    fn registers(&mut self) -> &mut M68kRegs {
        &mut self.regs
    }

    fn server_text(&self) -> Range<u32> {
        SERVER_TEXT
    }

    fn read_byte(&mut self, addr: u32) -> Result<u8, MemoryFault> {
        if !self.is_mapped(addr) {
            return Err(MemoryFault { addr });
        }
        Ok(self.peek(addr))
    }

    fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), MemoryFault> {
        if !self.is_mapped(addr) {
            return Err(MemoryFault { addr });
        }
        self.mem.insert(addr, val);
        Ok(())
    }

    fn load_u8(&mut self, addr: u32) -> u8 {
        self.peek(addr)
    }

    fn store_u8(&mut self, addr: u32, val: u8) {
        self.mem.insert(addr, val);
    }

    fn load_u32(&mut self, addr: u32) -> u32 {
        let mut bytes = [0; 4];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.peek(addr.wrapping_add(i as u32));
        }
        u32::from_be_bytes(bytes)
    }

    fn store_u32(&mut self, addr: u32, val: u32) {
        for (i, b) in val.to_be_bytes().into_iter().enumerate() {
            self.mem.insert(addr.wrapping_add(i as u32), b);
        }
    }

    fn hook_exceptions(&mut self) -> Result<(), MockError> {
        self.privileged();
        if self.fail_hook {
            return Err(MockError::HookFailed);
        }
        self.hooked = true;
        Ok(())
    }

    fn unhook_exceptions(&mut self) {
        self.privileged();
        self.hooked = false;
    }

    fn invalidate_caches(&mut self) {
        self.privileged();
        self.cache_flushes += 1;
    }

    fn supervisor<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.supervisor_calls += 1;
        let outer = core::mem::replace(&mut self.in_supervisor, true);
        let ret = f(self);
        self.in_supervisor = outer;
        ret
    }

    fn set_break_in(&mut self, enabled: bool) {
        self.break_in = enabled;
    }
}

impl Process for MockTarget {
    fn load(&mut self, filename: &str, args: &str, _env: Option<&str>) -> Result<Image, MockError> {
        self.loads.push((filename.to_string(), args.to_string()));
        self.programs
            .get(filename)
            .copied()
            .ok_or_else(|| MockError::NotFound(filename.to_string()))
    }

    fn run_inferior(
        &mut self,
        _image: &Image,
        on_exception: &mut dyn FnMut(&mut Self, u16) -> ExceptionAction,
    ) -> Result<RunOutcome, MockError> {
        self.runs += 1;
        self.break_in_at_run.push(self.break_in);
        while let Some(Raise { vector, pc }) = self.script.pop_front() {
            self.regs.set_pc(pc);
            let action = on_exception(self, vector);
            self.actions.push(action);
            if let ExceptionAction::Terminate(code) = action {
                return Ok(RunOutcome::Terminated(code.into()));
            }
        }
        Ok(RunOutcome::Exited(self.exit_code))
    }

    fn free(&mut self, image: Image) {
        self.freed.push(image);
    }

    fn set_drive(&mut self, drive: u16) {
        self.drive = drive;
    }

    fn set_path(&mut self, path: &str) -> Result<(), MockError> {
        self.path = path.to_string();
        Ok(())
    }

    fn current_dir(&mut self) -> Option<String> {
        let drive = (b'A' + self.drive as u8) as char;
        Some(format!("{}:{}", drive, self.path))
    }
}
