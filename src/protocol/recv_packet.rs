use log::{debug, info, warn};
use managed::ManagedSlice;

use crate::conn::ConnectionExt;
use crate::protocol::common::hex::decode_hex;
use crate::util::managed_vec::ManagedVec;

/// Ctrl-C: interrupt the running inferior.
pub const INTERRUPT: u8 = 0x03;
/// Ctrl-Z: shut the server down.
pub const KILL_SERVER: u8 = 0x1a;

pub const ESCAPE: u8 = 0x7d;
pub const ESCAPE_MASK: u8 = 0x20;

/// What arrived on the wire.
#[derive(Debug, PartialEq, Eq)]
pub enum Incoming {
    /// A packet with a verified checksum. Holds the length of the unescaped
    /// body at the start of the packet buffer.
    Packet(usize),
    /// The out-of-band interrupt byte.
    Interrupt,
    /// The kill-server control byte, or the operator asked the server to quit
    /// while no debugger was connected.
    KillServer,
    /// The connection dropped while waiting for (or in the middle of) a
    /// packet.
    ConnectionLost,
}

/// Receives a packet by pulling data from a blocking
/// [`ConnectionExt::read`].
///
/// With `acks` set, every packet is answered with `+`, or with `-` when its
/// checksum is wrong or it overflowed the buffer, and a nack'd packet is
/// re-received. Without acks the checksum is not checked at all, and only
/// overflowing packets are dropped.
pub fn recv_packet<C: ConnectionExt>(
    conn: &mut C,
    packet_buffer: &mut ManagedSlice<'_, u8>,
    acks: bool,
) -> Result<Incoming, C::Error> {
    loop {
        while !conn.carrier_detect() {
            if conn.quit_requested() {
                info!("Kill server requested while waiting for a connection");
                return Ok(Incoming::KillServer);
            }
        }

        // wait for the packet header
        loop {
            match conn.read()? {
                Some(b'$') => break,
                Some(INTERRUPT) => {
                    debug!("<-- interrupt packet");
                    return Ok(Incoming::Interrupt);
                }
                Some(KILL_SERVER) => {
                    info!("<-- kill server");
                    return Ok(Incoming::KillServer);
                }
                // stray acks, line noise
                Some(_) => {}
                None => {
                    debug!("Connection dropped while waiting for a packet");
                    return Ok(Incoming::ConnectionLost);
                }
            }
        }

        // Wrap the buf in a `ManagedVec` to keep the code readable.
        let mut buf = ManagedVec::new(packet_buffer);
        buf.clear();

        let mut checksum = 0u8;
        let mut escaped = false;
        let mut overflow = false;
        loop {
            let c = match conn.read()? {
                Some(c) => c,
                None => {
                    debug!("Connection dropped in the middle of a packet");
                    return Ok(Incoming::ConnectionLost);
                }
            };

            match c {
                b'#' => break,
                // a new header: whatever came before was garbage
                b'$' => {
                    buf.clear();
                    checksum = 0;
                    escaped = false;
                    overflow = false;
                    continue;
                }
                _ => {}
            }

            checksum = checksum.wrapping_add(c);
            if c == ESCAPE {
                escaped = true;
                continue;
            }

            let c = if escaped { c ^ ESCAPE_MASK } else { c };
            escaped = false;
            if buf.push(c).is_err() {
                overflow = true;
            }
        }

        let (hi, lo) = match (conn.read()?, conn.read()?) {
            (Some(hi), Some(lo)) => (hi, lo),
            _ => {
                debug!("Connection dropped while reading a checksum");
                return Ok(Incoming::ConnectionLost);
            }
        };

        #[cfg(feature = "trace-pkt")]
        log::trace!(
            "<-- ${}#{}{}",
            core::str::from_utf8(buf.as_slice()).unwrap_or("<invalid packet>"),
            hi as char,
            lo as char
        );

        let len = buf.len();

        let mut valid = !overflow;
        if overflow {
            warn!("Packet too big for the packet buffer, discarding it");
        }

        if acks {
            let expected = decode_hex::<u8>(&[hi, lo]).ok();
            if expected != Some(checksum) {
                warn!(
                    "Packet checksum mismatch: expected {:?}, calculated {:#04x}",
                    expected, checksum
                );
                valid = false;
            }
            conn.write(if valid { b'+' } else { b'-' })?;
            conn.flush()?;
        }

        if !conn.carrier_detect() {
            debug!("Connection dropped after receiving a packet");
            return Ok(Incoming::ConnectionLost);
        }

        if valid {
            return Ok(Incoming::Packet(len));
        }
    }
}
