use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, Zero};

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeHexError {
    NotAscii,
    Empty,
    Overflow,
    InvalidOutput,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeHexBufError {
    NotAscii,
    OddLength,
}

/// Value of a single hex digit. `x` stands for a nibble the debugger does not
/// know and reads as zero.
fn digit_value(c: u8) -> Option<u8> {
    let val = match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        b'x' | b'X' => 0,
        _ => return None,
    };
    Some(val)
}

pub fn is_hex(c: u8) -> bool {
    digit_value(c).is_some()
}

/// Parse a big-endian hex number of any width.
pub fn decode_hex<I>(buf: &[u8]) -> Result<I, DecodeHexError>
where
    I: FromPrimitive + Zero + CheckedAdd + CheckedMul,
{
    if buf.is_empty() {
        return Err(DecodeHexError::Empty);
    }

    let sixteen = I::from_u8(16).ok_or(DecodeHexError::InvalidOutput)?;
    buf.iter().try_fold(I::zero(), |acc, &c| {
        let nibble = digit_value(c).ok_or(DecodeHexError::NotAscii)?;
        let nibble = I::from_u8(nibble).ok_or(DecodeHexError::InvalidOutput)?;
        acc.checked_mul(&sixteen)
            .and_then(|acc| acc.checked_add(&nibble))
            .ok_or(DecodeHexError::Overflow)
    })
}

/// Turn a string of hex pairs into the bytes they spell out, reusing the
/// front half of `buf` for the result.
pub fn decode_hex_buf(buf: &mut [u8]) -> Result<&mut [u8], DecodeHexBufError> {
    if buf.len() % 2 != 0 {
        return Err(DecodeHexBufError::OddLength);
    }

    let len = buf.len() / 2;
    for i in 0..len {
        let hi = digit_value(buf[2 * i]).ok_or(DecodeHexBufError::NotAscii)?;
        let lo = digit_value(buf[2 * i + 1]).ok_or(DecodeHexBufError::NotAscii)?;
        // never overtakes the read position
        buf[i] = hi << 4 | lo;
    }
    Ok(&mut buf[..len])
}

/// Lowercase ascii digit for the low nibble of `nybble`.
pub fn nybble_to_hex(nybble: u8) -> u8 {
    b"0123456789abcdef"[(nybble & 0xf) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(decode_hex::<u32>(b"00ff8240"), Ok(0x00ff_8240));
        assert_eq!(decode_hex::<u32>(b"FFFF8201"), Ok(0xffff_8201));
        assert_eq!(decode_hex::<u8>(b"5"), Ok(5));
        assert_eq!(decode_hex::<usize>(b"1x"), Ok(0x10));
    }

    #[test]
    fn bad_numbers() {
        assert_eq!(decode_hex::<u32>(b""), Err(DecodeHexError::Empty));
        assert_eq!(decode_hex::<u32>(b"4e4g"), Err(DecodeHexError::NotAscii));
        assert_eq!(decode_hex::<u16>(b"10000"), Err(DecodeHexError::Overflow));
    }

    #[test]
    fn byte_strings() {
        let mut raw = b"4e75".to_vec();
        assert_eq!(decode_hex_buf(&mut raw).unwrap(), [0x4e, 0x75]);

        let mut raw = Vec::new();
        assert!(decode_hex_buf(&mut raw).unwrap().is_empty());
    }

    #[test]
    fn bad_byte_strings() {
        let mut raw = b"4e7".to_vec();
        assert_eq!(
            decode_hex_buf(&mut raw).unwrap_err(),
            DecodeHexBufError::OddLength
        );

        let mut raw = b"4e7$".to_vec();
        assert_eq!(
            decode_hex_buf(&mut raw).unwrap_err(),
            DecodeHexBufError::NotAscii
        );
    }

    #[test]
    fn nybbles() {
        let digits = (0..16).map(nybble_to_hex).collect::<Vec<_>>();
        assert_eq!(digits, b"0123456789abcdef");
        assert_eq!(nybble_to_hex(0xa7), b'7');
    }
}
