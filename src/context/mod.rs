//! Sharing one machine between the server and the inferior.
//!
//! Both programs want to own the same interrupt vectors and video
//! registers. Whenever control changes hands the state of the outgoing side
//! is captured into its [`HardwareSnapshot`] and the incoming side's snapshot
//! is made live. While the server is live, debugger accesses to those
//! addresses are redirected to the inferior's snapshot, so the debugger never
//! sees the server's own vectors or screen setup.

use log::{debug, trace};

use crate::arch::CpuInfo;
use crate::breakpoints::BreakpointTable;
use crate::target::{MemoryFault, Target};

mod redirect;
mod snapshot;

pub use redirect::{canonical, redirect, SNAPSHOT_LEN};
pub use snapshot::HardwareSnapshot;

/// Which side's state is currently in the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Live {
    Server,
    Inferior,
}

/// Owns the two hardware snapshots and swaps them.
#[derive(Debug)]
pub struct ContextSwitch {
    cpu: CpuInfo,
    server: HardwareSnapshot,
    inferior: HardwareSnapshot,
    live: Live,
}

impl ContextSwitch {
    pub fn new(cpu: CpuInfo) -> ContextSwitch {
        ContextSwitch {
            cpu,
            server: HardwareSnapshot::new(),
            inferior: HardwareSnapshot::new(),
            live: Live::Server,
        }
    }

    pub fn cpu(&self) -> &CpuInfo {
        &self.cpu
    }

    pub fn live(&self) -> Live {
        self.live
    }

    /// Take over the machine: forget any breakpoints, hook the exception
    /// vectors, and record the resulting state as the server's.
    pub fn enter_server_context<T: Target>(
        &mut self,
        target: &mut T,
        breakpoints: &mut BreakpointTable,
    ) -> Result<(), T::Error> {
        breakpoints.clear_all();

        let cpu = self.cpu;
        let server = &mut self.server;
        target.supervisor(|t| {
            t.hook_exceptions()?;
            t.invalidate_caches();
            server.capture(t, &cpu);
            Ok(())
        })?;

        self.live = Live::Server;
        self.prime_inferior();
        debug!("Entered server context");
        Ok(())
    }

    /// Give back the vectors that were in place before the server started.
    /// The server's own state is not preserved.
    pub fn leave_server_context<T: Target>(&mut self, target: &mut T) {
        target.supervisor(|t| t.unhook_exceptions());
        debug!("Left server context");
    }

    /// A freshly started inferior inherits whatever the server has live.
    pub fn prime_inferior(&mut self) {
        self.inferior = self.server.clone();
    }

    /// Save the server's state and make the inferior's live.
    pub fn switch_to_inferior<T: Target>(&mut self, target: &mut T) {
        if self.live == Live::Inferior {
            return;
        }

        let cpu = self.cpu;
        let (server, inferior) = (&mut self.server, &self.inferior);
        target.supervisor(|t| {
            server.capture(t, &cpu);
            inferior.restore(t, &cpu);
            t.invalidate_caches();
        });
        self.live = Live::Inferior;
        trace!("Switched to inferior context");
    }

    /// Save the inferior's state and make the server's live.
    pub fn switch_to_server<T: Target>(&mut self, target: &mut T) {
        if self.live == Live::Server {
            return;
        }

        let cpu = self.cpu;
        let (server, inferior) = (&self.server, &mut self.inferior);
        target.supervisor(|t| {
            inferior.capture(t, &cpu);
            server.restore(t, &cpu);
            t.invalidate_caches();
        });
        self.live = Live::Server;
        trace!("Switched to server context");
    }

    /// Read a byte of the inferior's address space.
    pub fn read_inferior_byte<T: Target>(
        &mut self,
        target: &mut T,
        addr: u32,
    ) -> Result<u8, MemoryFault> {
        match self.shadowed(addr) {
            Some(offset) => Ok(self.inferior.byte(offset)),
            None => target.read_byte(canonical(addr, &self.cpu)),
        }
    }

    /// Write a byte of the inferior's address space.
    pub fn write_inferior_byte<T: Target>(
        &mut self,
        target: &mut T,
        addr: u32,
        val: u8,
    ) -> Result<(), MemoryFault> {
        match self.shadowed(addr) {
            Some(offset) => {
                self.inferior.set_byte(offset, val);
                Ok(())
            }
            None => target.write_byte(canonical(addr, &self.cpu), val),
        }
    }

    fn shadowed(&self, addr: u32) -> Option<usize> {
        match self.live {
            Live::Server => redirect(addr, &self.cpu),
            Live::Inferior => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::mock::MockTarget;

    fn setup() -> (MockTarget, ContextSwitch) {
        let mut target = MockTarget::new();
        target.store_u32(0x118, 0x00fc_0118); // MFP vector, as set by TOS
        target.store_u8(0xffff_8260, 0);
        (target, ContextSwitch::new(CpuInfo::default()))
    }

    #[test]
    fn entering_hooks_and_discards_breakpoints() {
        let (mut target, mut ctx) = setup();
        let mut breakpoints = BreakpointTable::new();
        let image = crate::target::Image {
            text_base: 0x1000,
            text_len: 0x100,
            bss_base: 0x1100,
            bss_len: 0x100,
            ..Default::default()
        };
        breakpoints.insert(&mut target, Some(&image), 0x1000).unwrap();

        ctx.enter_server_context(&mut target, &mut breakpoints).unwrap();
        assert!(target.hooked);
        assert!(breakpoints.is_empty());
        assert_eq!(ctx.live(), Live::Server);

        // the inferior starts out with the server's view
        assert_eq!(ctx.read_inferior_byte(&mut target, 0x11b).unwrap(), 0x18);

        ctx.leave_server_context(&mut target);
        assert!(!target.hooked);
    }

    #[test]
    fn failing_to_hook_is_reported() {
        let (mut target, mut ctx) = setup();
        target.fail_hook = true;
        let mut breakpoints = BreakpointTable::new();
        assert!(ctx
            .enter_server_context(&mut target, &mut breakpoints)
            .is_err());
    }

    #[test]
    fn switching_swaps_hardware_state() {
        let (mut target, mut ctx) = setup();
        let mut breakpoints = BreakpointTable::new();
        ctx.enter_server_context(&mut target, &mut breakpoints).unwrap();

        ctx.switch_to_inferior(&mut target);
        assert_eq!(ctx.live(), Live::Inferior);
        // the inferior changes screen mode and installs its own vector
        target.store_u8(0xffff_8260, 2);
        target.store_u32(0x118, 0x0001_2000);

        ctx.switch_to_server(&mut target);
        assert_eq!(target.peek(0xffff_8260), 0);
        assert_eq!(target.load_u32(0x118), 0x00fc_0118);

        // the debugger sees the inferior's values
        assert_eq!(ctx.read_inferior_byte(&mut target, 0xffff_8260).unwrap(), 2);
        assert_eq!(ctx.read_inferior_byte(&mut target, 0x11a).unwrap(), 0x20);

        ctx.switch_to_inferior(&mut target);
        assert_eq!(target.peek(0xffff_8260), 2);
        assert_eq!(target.load_u32(0x118), 0x0001_2000);
    }

    #[test]
    fn switches_are_idempotent() {
        let (mut target, mut ctx) = setup();
        let mut breakpoints = BreakpointTable::new();
        ctx.enter_server_context(&mut target, &mut breakpoints).unwrap();
        let flushes = target.cache_flushes;

        ctx.switch_to_server(&mut target);
        assert_eq!(target.cache_flushes, flushes);

        ctx.switch_to_inferior(&mut target);
        ctx.switch_to_inferior(&mut target);
        assert_eq!(target.cache_flushes, flushes + 1);
    }

    #[test]
    fn writes_to_shadowed_addresses_land_in_the_snapshot() {
        let (mut target, mut ctx) = setup();
        let mut breakpoints = BreakpointTable::new();
        ctx.enter_server_context(&mut target, &mut breakpoints).unwrap();

        // a 68000 ST decodes only 24 address bits
        ctx.write_inferior_byte(&mut target, 0x00ff_8260, 1).unwrap();
        assert_eq!(target.peek(0xffff_8260), 0);

        ctx.switch_to_inferior(&mut target);
        assert_eq!(target.peek(0xffff_8260), 1);
    }

    #[test]
    fn plain_memory_goes_straight_through() {
        let (mut target, mut ctx) = setup();
        ctx.write_inferior_byte(&mut target, 0x2000, 0xab).unwrap();
        assert_eq!(target.peek(0x2000), 0xab);
        assert_eq!(ctx.read_inferior_byte(&mut target, 0x2000).unwrap(), 0xab);
        assert_eq!(
            ctx.read_inferior_byte(&mut target, 0x0050_0000),
            Err(MemoryFault { addr: 0x0050_0000 })
        );
    }
}
