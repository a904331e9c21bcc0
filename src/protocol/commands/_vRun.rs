use super::prelude::*;

/// `vRun;filename[;arg]...`, all hex encoded. An empty filename re-runs the
/// previous inferior.
#[derive(Debug)]
pub struct vRun<'a> {
    pub filename: Option<&'a [u8]>,
    pub args: Args<'a>,
}

/// The `;` separated, still hex encoded argument list.
#[derive(Debug)]
pub struct Args<'a>(&'a mut [u8]);

impl<'a> Args<'a> {
    /// Decoded arguments. Empty ones are skipped.
    pub fn into_iter(self) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.0
            .split_mut(|&b| b == b';')
            .filter_map(|raw| decode_hex_buf(raw).ok())
            .filter(|arg| !arg.is_empty())
            .map(|arg| arg as &[u8])
    }
}

impl<'a> ParseCommand<'a> for vRun<'a> {
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self> {
        let body = buf.into_body();
        let (name, args): (&'a mut [u8], &'a mut [u8]) =
            match body.iter().position(|&b| b == b';') {
                Some(i) => {
                    let (name, rest) = body.split_at_mut(i);
                    (name, &mut rest[1..])
                }
                None => (body, &mut []),
            };

        if !args.iter().all(|&b| b == b';' || is_hex(b)) {
            return None;
        }

        // some debuggers terminate the name inside the encoding
        let name: &'a [u8] = decode_hex_buf(name).ok()?;
        let end = name
            .iter()
            .position(|&b| b == b';' || b == 0)
            .unwrap_or(name.len());
        let filename = match &name[..end] {
            [] => None,
            name => Some(name),
        };

        Some(vRun {
            filename,
            args: Args(args),
        })
    }
}
