//! Common types and definitions used across `gdbsrv`.

mod signal;

pub use self::signal::{SigCode, Signal};
