//! The interface between the server and the machine it runs on.
//!
//! The server shares the processor with the program being debugged, so it
//! cannot touch hardware directly. Everything privileged or platform
//! specific goes through two traits implemented by the embedder:
//!
//! - [`Target`]: the low-level runtime. It owns the exception vectors the
//!   server hooks, performs exception-safe and raw memory accesses, and
//!   exposes the register frame saved by the last exception.
//! - [`Process`]: loading, running and freeing the inferior program.
//!
//! All methods are called from the one and only flow of control; nothing
//! needs to be reentrant.

use core::ops::Range;

use crate::arch::reg::M68kRegs;

mod process;

#[cfg(test)]
pub(crate) mod mock;

pub use process::{ExceptionAction, Image, Process, RunOutcome};

/// An exception-safe memory access hit a bus or address error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryFault {
    /// The address that faulted.
    pub addr: u32,
}

/// Low-level runtime services.
pub trait Target {
    /// A target-specific fatal error.
    type Error;

    /// The register frame captured by the most recent exception. Changes made
    /// here take effect when the inferior is resumed.
    fn registers(&mut self) -> &mut M68kRegs;

    /// Address range of the server's own text segment. An exception with pc
    /// inside it is a crash in the server itself.
    fn server_text(&self) -> Range<u32>;

    /// Read a byte, catching bus and address errors.
    fn read_byte(&mut self, addr: u32) -> Result<u8, MemoryFault>;

    /// Write a byte, catching bus and address errors.
    fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), MemoryFault>;

    /// Raw byte load. Only called in supervisor mode, on hardware known to
    /// exist.
    fn load_u8(&mut self, addr: u32) -> u8;

    /// Raw byte store. Only called in supervisor mode.
    fn store_u8(&mut self, addr: u32, val: u8);

    /// Raw long load. Only called in supervisor mode.
    fn load_u32(&mut self, addr: u32) -> u32;

    /// Raw long store. Only called in supervisor mode.
    fn store_u32(&mut self, addr: u32, val: u32);

    /// Install the server's exception handlers, remembering the vectors they
    /// replace.
    fn hook_exceptions(&mut self) -> Result<(), Self::Error>;

    /// Put back the vectors replaced by [`Target::hook_exceptions`].
    fn unhook_exceptions(&mut self);

    /// Flush instruction and data caches (68020 and up).
    fn invalidate_caches(&mut self);

    /// Run `f` in supervisor mode with interrupts masked.
    fn supervisor<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R;

    /// Enable or disable the serial receive interrupt that lets the debugger
    /// break into a running inferior with ctrl-c.
    fn set_break_in(&mut self, enabled: bool);
}
