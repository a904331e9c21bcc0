//! Command line handling for embedders that take their settings from `argv`.

use clap::Parser;

use crate::conn::TransportSelector;
use crate::stub::ServerFlags;

/// Command line of the server.
#[derive(Debug, Parser)]
#[command(name = "gdbsrv")]
#[command(about = "GDB remote debugging server for TOS programs")]
pub struct Args {
    /// Log server activity
    #[arg(long)]
    pub debug: bool,

    /// Also log every packet exchanged with the debugger
    #[arg(long, alias = "remote-debug")]
    pub debug_remote: bool,

    /// Keep serving after the inferior is gone; only load it when the
    /// debugger asks
    #[arg(long)]
    pub multi: bool,

    /// Exit after the first inferior, even in extended mode
    #[arg(long)]
    pub once: bool,

    /// `[COMn | stdio] [program [args...]]`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

/// Settings resolved from [`Args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub transport: TransportSelector,
    /// Empty when no inferior was named.
    pub inferior_filename: String,
    /// The inferior's arguments, joined by single spaces.
    pub inferior_args: String,
    pub flags: ServerFlags,
}

impl Config {
    pub fn from_args(args: Args) -> Config {
        let mut words = args.words.into_iter().peekable();

        let transport = match words.peek().map(String::as_str) {
            Some("stdio") | Some("-") => {
                words.next();
                TransportSelector::Stdio
            }
            Some(word) => match TransportSelector::from_device(word) {
                Some(selector) => {
                    words.next();
                    selector
                }
                None => TransportSelector::default(),
            },
            None => TransportSelector::default(),
        };

        let inferior_filename = words.next().unwrap_or_default();
        let inferior_args = words.collect::<Vec<_>>().join(" ");

        let mut flags = ServerFlags::empty();
        flags.set(ServerFlags::DEBUG, args.debug || args.debug_remote);
        flags.set(ServerFlags::DEBUG_REMOTE, args.debug_remote);
        flags.set(ServerFlags::MULTI, args.multi);
        flags.set(ServerFlags::RUN_ONCE, args.once);

        Config {
            transport,
            inferior_filename,
            inferior_args,
            flags,
        }
    }

    /// Parse the process' own command line.
    pub fn parse() -> Config {
        Config::from_args(Args::parse())
    }

    /// Most verbose level worth installing a logger for.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.flags.contains(ServerFlags::DEBUG_REMOTE) {
            log::LevelFilter::Trace
        } else if self.flags.contains(ServerFlags::DEBUG) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
