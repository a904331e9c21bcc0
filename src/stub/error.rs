use core::fmt::{self, Debug, Display};

use crate::protocol::ResponseWriterError;

/// An error which may occur while running the server.
#[derive(Debug)]
#[non_exhaustive]
pub enum ServerError<T, C> {
    /// Connection Error while initializing the session.
    ConnectionInit(C),
    /// Connection Error while reading request.
    ConnectionRead(C),
    /// Connection Error while writing response.
    ConnectionWrite(C),
    /// Target encountered a fatal error.
    TargetError(T),
    /// The inferior named on the command line could not be loaded.
    Load(T),
    /// A load was requested without naming an inferior.
    NoInferior,
}

impl<T, C> Display for ServerError<T, C>
where
    C: Debug,
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::ServerError::*;
        match self {
            ConnectionInit(e) => write!(f, "Connection Error while initializing the session: {:?}", e),
            ConnectionRead(e) => write!(f, "Connection Error while reading request: {:?}", e),
            ConnectionWrite(e) => write!(f, "Connection Error while writing response: {:?}", e),
            TargetError(e) => write!(f, "Target threw a fatal error: {:?}", e),
            Load(e) => write!(f, "Could not load inferior: {:?}", e),
            NoInferior => write!(f, "No inferior to load."),
        }
    }
}

#[cfg(feature = "std")]
impl<T, C> std::error::Error for ServerError<T, C>
where
    C: Debug,
    T: Debug,
{
}

/// Errors raised while handling a single command. None of them end the
/// session: each one is answered with an `Exx` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InternalError {
    /// The command failed with an errno-style error code.
    NonFatal(u8),
    /// The reply did not fit into the response buffer.
    ResponseOverflow,
}

impl InternalError {
    /// Error code sent to the debugger.
    pub fn code(self) -> u8 {
        match self {
            InternalError::NonFatal(code) => code,
            InternalError::ResponseOverflow => 1,
        }
    }
}

impl From<ResponseWriterError> for InternalError {
    fn from(_: ResponseWriterError) -> Self {
        InternalError::ResponseOverflow
    }
}
