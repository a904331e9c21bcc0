//! Stop replies sent to the debugger.

use log::{debug, error, warn};

use crate::arch::reg::M68kRegs;
use crate::common::{SigCode, Signal};
use crate::protocol::{ResponseWriter, ResponseWriterError};
use crate::stub::core_impl::ServerCore;
use crate::target::Target;

/// fp (a6), sp, sr and pc are sent along with every breakpoint stop.
const EXPEDITED_REGS: core::ops::RangeInclusive<u8> = 14..=17;

#[rustfmt::skip]
const CORE_REG_NAMES: [&str; 18] = [
    "d0", "d1", "d2", "d3", "d4", "d5", "d6", "d7",
    "a0", "a1", "a2", "a3", "a4", "a5", "a6", "sp",
    "sr", "pc",
];

impl ServerCore {
    /// Write the reply for the last stop: `T05` with the expedited registers
    /// for a breakpoint, `Sxx` for everything else.
    ///
    /// The first stop at the inferior's entry point also retires the one-shot
    /// start breakpoint. It is not reported as a `swbreak`, since the
    /// debugger never asked for it.
    pub(crate) fn write_stop<T: Target>(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
    ) -> Result<(), ResponseWriterError> {
        let signal = self.session.signal;
        if signal != Signal::SIGTRAP || self.session.code != SigCode::TRAP_BRKPT {
            res.write(b'S')?;
            return res.write_hex(signal.0);
        }

        res.write(b'T')?;
        res.write_hex(signal.0)?;

        let pc = target.registers().pc();
        if self.session.start_breakpoint == Some(pc) {
            match self.breakpoints.remove(target, pc) {
                Ok(()) => {
                    debug!("Inferior reached its entry point at {:#010x}", pc);
                    self.session.start_breakpoint = None;
                }
                Err(e) => warn!("Could not remove the start breakpoint: {}", e),
            }
        } else {
            res.write_str("swbreak:;")?;
        }

        let regs = target.registers();
        for i in EXPEDITED_REGS {
            res.write_hex(i)?;
            res.write(b':')?;
            res.write_u32(regs.words()[i as usize])?;
            res.write(b';')?;
        }
        Ok(())
    }
}

/// Log the register frame of an exception raised by the server itself.
pub(crate) fn log_crash_dump(regs: &M68kRegs, server_text: core::ops::Range<u32>) {
    error!("Exception in server code! Aborting.");
    for (name, val) in CORE_REG_NAMES.iter().zip(regs.core()) {
        error!("  {:>2} = {:#010x}", name, val);
    }
    error!("  server text at {:#010x}", server_text.start);
}
