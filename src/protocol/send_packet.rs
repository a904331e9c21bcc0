use log::{debug, warn};

use crate::conn::ConnectionExt;
use crate::protocol::common::hex::nybble_to_hex;
use crate::protocol::recv_packet::{ESCAPE, ESCAPE_MASK};

fn needs_escape(b: u8) -> bool {
    matches!(b, b'$' | b'#' | ESCAPE)
}

/// Frame `payload` as `$<escaped payload>#<checksum>` and write it out.
///
/// Nothing is written while the carrier is down. When `wait_for_ack` is set,
/// a single acknowledgement byte is consumed after the packet has been
/// flushed. A negative (or missing) acknowledgement is logged, but the packet
/// is not re-sent.
pub fn send_packet<C: ConnectionExt>(
    conn: &mut C,
    payload: &[u8],
    wait_for_ack: bool,
) -> Result<(), C::Error> {
    if !conn.carrier_detect() {
        debug!("No carrier, dropping outgoing packet");
        return Ok(());
    }

    #[cfg(feature = "trace-pkt")]
    log::trace!(
        "--> ${}",
        core::str::from_utf8(payload).unwrap_or("<invalid packet>")
    );

    let mut checksum = 0u8;
    conn.write(b'$')?;
    for &b in payload {
        if needs_escape(b) {
            conn.write(ESCAPE)?;
            checksum = checksum.wrapping_add(ESCAPE);
            let b = b ^ ESCAPE_MASK;
            conn.write(b)?;
            checksum = checksum.wrapping_add(b);
        } else {
            conn.write(b)?;
            checksum = checksum.wrapping_add(b);
        }
    }
    conn.write(b'#')?;
    conn.write(nybble_to_hex(checksum >> 4))?;
    conn.write(nybble_to_hex(checksum))?;
    conn.flush()?;

    if wait_for_ack {
        match conn.read()? {
            Some(b'+') => {}
            Some(b'-') => warn!("Packet was nack'd by the debugger"),
            Some(c) => debug!("Unexpected ack byte {:#04x}", c),
            None => debug!("Connection dropped while waiting for an ack"),
        }
    }

    Ok(())
}
