//! Private utility types used internally within `gdbsrv`.
//!
//! These are all bits of functionality that _could_ exist as their own crates /
//! libraries, and do not rely on any `gdbsrv` specific infrastructure.

pub mod managed_vec;
