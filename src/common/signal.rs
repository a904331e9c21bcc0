use core::fmt;

/// Cross-platform signal numbers defined by the GDB Remote Serial Protocol.
///
/// Only the signals the server can actually report are listed. Transcribed
/// from <https://github.com/bminor/binutils-gdb/blob/master/include/gdb/signals.def>
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u8);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl Signal {
    #[doc = "Hangup"]                 pub const SIGHUP:  Self = Self(1);
    #[doc = "Interrupt"]              pub const SIGINT:  Self = Self(2);
    #[doc = "Quit"]                   pub const SIGQUIT: Self = Self(3);
    #[doc = "Illegal instruction"]    pub const SIGILL:  Self = Self(4);
    #[doc = "Trace/breakpoint trap"]  pub const SIGTRAP: Self = Self(5);
    #[doc = "Aborted"]                pub const SIGABRT: Self = Self(6);
    #[doc = "Emulation trap"]         pub const SIGEMT:  Self = Self(7);
    #[doc = "Arithmetic exception"]   pub const SIGFPE:  Self = Self(8);
    #[doc = "Killed"]                 pub const SIGKILL: Self = Self(9);
    #[doc = "Bus error"]              pub const SIGBUS:  Self = Self(10);
    #[doc = "Segmentation fault"]     pub const SIGSEGV: Self = Self(11);
    #[doc = "Bad system call"]        pub const SIGSYS:  Self = Self(12);
    #[doc = "Broken pipe"]            pub const SIGPIPE: Self = Self(13);
    #[doc = "Alarm clock"]            pub const SIGALRM: Self = Self(14);
    #[doc = "Terminated"]             pub const SIGTERM: Self = Self(15);
    #[doc = "User defined signal 1"]  pub const SIGUSR1: Self = Self(30);
}

impl fmt::Display for Signal {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Signal::SIGHUP  => "SIGHUP - Hangup",
            Signal::SIGINT  => "SIGINT - Interrupt",
            Signal::SIGQUIT => "SIGQUIT - Quit",
            Signal::SIGILL  => "SIGILL - Illegal instruction",
            Signal::SIGTRAP => "SIGTRAP - Trace/breakpoint trap",
            Signal::SIGABRT => "SIGABRT - Aborted",
            Signal::SIGEMT  => "SIGEMT - Emulation trap",
            Signal::SIGFPE  => "SIGFPE - Arithmetic exception",
            Signal::SIGKILL => "SIGKILL - Killed",
            Signal::SIGBUS  => "SIGBUS - Bus error",
            Signal::SIGSEGV => "SIGSEGV - Segmentation fault",
            Signal::SIGSYS  => "SIGSYS - Bad system call",
            Signal::SIGPIPE => "SIGPIPE - Broken pipe",
            Signal::SIGALRM => "SIGALRM - Alarm clock",
            Signal::SIGTERM => "SIGTERM - Terminated",
            Signal::SIGUSR1 => "SIGUSR1 - User defined signal 1",
            _ => return write!(f, "signal {}", self.0),
        };

        write!(f, "{}", s)
    }
}

/// The `si_code` that accompanies a [`Signal`], refining why it was raised.
///
/// Values match the ones the debugger's m68k TOS support expects. A code of
/// `0` carries no extra information.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SigCode(pub u8);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl SigCode {
    #[doc = "No additional information"]       pub const NONE:       Self = Self(0);
    #[doc = "Invalid address alignment"]       pub const BUS_ADRALN: Self = Self(1);
    #[doc = "Non-existent physical address"]   pub const BUS_ADRERR: Self = Self(2);
    #[doc = "Illegal opcode"]                  pub const ILL_ILLOPC: Self = Self(3);
    #[doc = "Integer divide by zero"]          pub const FPE_INTDIV: Self = Self(4);
    #[doc = "Integer overflow"]                pub const FPE_INTOVF: Self = Self(5);
    #[doc = "Privileged opcode"]               pub const ILL_PRVOPC: Self = Self(6);
    #[doc = "Process trace trap"]              pub const TRAP_TRACE: Self = Self(7);
    #[doc = "Object specific hardware error"]  pub const BUS_OBJERR: Self = Self(8);
    #[doc = "Process breakpoint"]              pub const TRAP_BRKPT: Self = Self(9);
    #[doc = "Floating point inexact result"]   pub const FPE_FLTRES: Self = Self(10);
    #[doc = "Floating point divide by zero"]   pub const FPE_FLTDIV: Self = Self(11);
    #[doc = "Floating point underflow"]        pub const FPE_FLTUND: Self = Self(12);
    #[doc = "Floating point overflow"]         pub const FPE_FLTOVF: Self = Self(13);
    #[doc = "Floating point invalid operation"] pub const FPE_FLTINV: Self = Self(14);
}
