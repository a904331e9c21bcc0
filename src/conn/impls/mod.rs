//! Implementations of the [`Connection`](super::Connection) trait for
//! `std`-backed byte streams.

#[cfg(feature = "std")]
pub(crate) mod io;
#[cfg(feature = "std")]
pub(crate) mod transport;
