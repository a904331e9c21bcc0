use alloc::string::String;

use crate::common::{SigCode, Signal};
use crate::target::Image;

/// What the command loop decided to do once it stops listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    ListenToGdb,
    ContinueExecution,
    Kill,
    Run,
    Restart,
}

/// Lifecycle of the (single) inferior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferiorState {
    NotLoaded,
    Loaded,
    Running,
}

/// How the next command loop entered from the outer server loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupCode {
    /// Wait for the debugger.
    Silent,
    /// An inferior was just loaded on the debugger's request. Start it, so
    /// that its first stop answers the request.
    Report,
    /// Loading the requested inferior failed. Tell the debugger.
    Error,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SessionFlags: u8 {
        /// The debugger asked for the extended remote protocol.
        const EXTENDED = 1 << 0;
        /// Keep serving after the inferior is gone, loading on demand.
        const MULTI = 1 << 1;
        /// Exit once the first inferior is done, even in extended mode.
        const RUN_ONCE = 1 << 2;
        const NO_ACK = 1 << 3;
        /// The outer loop should load `filename` before the next command loop.
        const LOAD_REQUESTED = 1 << 4;
    }
}

/// State of the debug session that outlives a single command loop.
#[derive(Debug)]
pub struct Session {
    pub state: InferiorState,
    pub flags: SessionFlags,
    pub startup: StartupCode,

    /// Last reported stop.
    pub signal: Signal,
    pub code: SigCode,

    pub filename: String,
    pub args: String,
    /// Working directory captured when the inferior was loaded.
    pub workdir: String,

    pub image: Option<Image>,
    /// One-shot breakpoint on the inferior's entry point.
    pub start_breakpoint: Option<u32>,
}

impl Session {
    pub fn new(flags: SessionFlags) -> Session {
        Session {
            state: InferiorState::NotLoaded,
            flags,
            startup: StartupCode::Silent,

            signal: Signal::SIGUSR1,
            code: SigCode::NONE,

            filename: String::new(),
            args: String::new(),
            workdir: String::new(),

            image: None,
            start_breakpoint: None,
        }
    }

    #[inline(always)]
    pub fn extended(&self) -> bool {
        self.flags.contains(SessionFlags::EXTENDED)
    }

    #[inline(always)]
    pub fn multi(&self) -> bool {
        self.flags.contains(SessionFlags::MULTI)
    }

    #[inline(always)]
    pub fn no_ack(&self) -> bool {
        self.flags.contains(SessionFlags::NO_ACK)
    }

    #[inline(always)]
    pub fn load_requested(&self) -> bool {
        self.flags.contains(SessionFlags::LOAD_REQUESTED)
    }

    /// Whether the outer server loop goes around again.
    pub fn keep_serving(&self) -> bool {
        (self.extended() && !self.flags.contains(SessionFlags::RUN_ONCE)) || self.multi()
    }

    /// The operator or the debugger asked the server itself to exit.
    pub fn shut_down(&mut self) {
        self.flags.insert(SessionFlags::RUN_ONCE);
        self.flags
            .remove(SessionFlags::MULTI | SessionFlags::LOAD_REQUESTED);
    }

    /// Exit code used when the server terminates a running inferior.
    pub fn termination_code(&self) -> i16 {
        if self.signal == Signal::SIGABRT {
            -1
        } else {
            -32
        }
    }
}
