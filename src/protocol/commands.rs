use crate::protocol::packet::PacketBuf;

/// Common imports used by the individual command parsers.
pub(self) mod prelude {
    pub use crate::protocol::commands::ParseCommand;
    pub use crate::protocol::common::hex::{decode_hex, decode_hex_buf, is_hex};
    pub use crate::protocol::packet::PacketBuf;
}

pub trait ParseCommand<'a>: Sized {
    /// Try to parse a packet from the packet buffer. The buffer's body starts
    /// right after the command's name.
    fn from_packet(buf: PacketBuf<'a>) -> Option<Self>;
}

/// Command parse error
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// The command was recognized, but its arguments were malformed.
    Malformed(&'static str),
}

// Commands are matched by name prefix, in declaration order.
macro_rules! commands {
    ($($name:literal => $mod:ident::$command:ident$(<$lifetime:lifetime>)?,)*) => {
        $(
            #[allow(non_snake_case, non_camel_case_types)]
            pub mod $mod;
        )*
        $(pub use $mod::$command;)*

        /// GDB commands
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        pub enum Command<'a> {
            $($command($command<$($lifetime)?>),)*
            Unknown(&'a [u8]),
        }

        impl<'a> Command<'a> {
            pub fn from_packet(buf: PacketBuf<'a>) -> Result<Command<'a>, CommandParseError> {
                $(
                    if buf.as_body().starts_with($name.as_bytes()) {
                        let buf = buf.trim_start_body_bytes($name.len());
                        return match $command::from_packet(buf) {
                            Some(cmd) => Ok(Command::$command(cmd)),
                            None => Err(CommandParseError::Malformed($name)),
                        };
                    }
                )*

                Ok(Command::Unknown(buf.into_body()))
            }
        }
    };
}

commands! {
    "?" => question_mark::QuestionMark,
    "!" => exclamation_mark::ExclamationMark,
    "c" => _c::c,
    "D" => _d_upcase::D,
    "g" => _g::g,
    "G" => _g_upcase::G<'a>,
    "H" => _h_upcase::H,
    "k" => _k::k,
    "m" => _m::m,
    "M" => _m_upcase::M<'a>,
    "p" => _p::p,
    "P" => _p_upcase::P<'a>,
    "qOffsets" => _qOffsets::qOffsets,
    "qSupported" => _qSupported::qSupported,
    "qXfer:features:read:" => _qXfer_features_read::qXferFeaturesRead<'a>,
    "QSetWorkingDir:" => _QSetWorkingDir::QSetWorkingDir<'a>,
    "QStartNoAckMode" => _QStartNoAckMode::QStartNoAckMode,
    "R" => _r_upcase::R,
    "s" => _s::s,
    "T" => _t_upcase::T,
    "vKill;" => _vKill::vKill,
    "vRun;" => _vRun::vRun<'a>,
    "z" => _z::z,
    "Z" => _z_upcase::Z,
}

pub mod breakpoint;
