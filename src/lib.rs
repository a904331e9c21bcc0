//! A GDB Remote Serial Protocol server for m68k Atari TOS machines, running
//! on the same machine as the program it debugs.
//!
//! The server takes over the exception vectors, loads the inferior and runs
//! it. Every exception the inferior raises lands back in the server, which
//! reports it to the debugger over the serial line and waits for commands.
//! The low-level runtime (vector hooks, supervisor mode, the TOS loader) is
//! provided by the embedder through the [`target::Target`] and
//! [`target::Process`] traits.
//!
//! ## Features
//!
//! - `alloc`:
//!   - Heap-allocated packet buffers when none are provided.
//! - `std` (implies `alloc`):
//!   - `impl Connection` for `std::io` streams and the host serial devices.
//!   - The [`config`] module, parsing the server's command line with `clap`.
//! - `trace-pkt`:
//!   - Logs every packet sent and received via `trace!`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod protocol;
mod util;

pub mod arch;
pub mod breakpoints;
pub mod common;
pub mod conn;
pub mod context;
pub mod stub;
pub mod target;

#[cfg(feature = "std")]
pub mod config;

pub use stub::{GdbServer, GdbServerBuilder, ServerError, ServerFlags};
