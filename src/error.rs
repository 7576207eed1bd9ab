use std::fmt;
use std::io;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building or reading sample streams.
///
/// Reaching the end of a stream is not an error; see
/// [`ReadStatus::End`](crate::graph::ReadStatus::End).
#[derive(Debug)]
pub enum Error {
    /// A construction-time contract violation (out-of-range sustain,
    /// non-positive frequency, zero sample rate, oversized amplitude, ...).
    InvalidParameter {
        name: &'static str,
        message: String,
    },
    /// An underlying reader failed with something other than end-of-stream.
    Upstream(io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter `{name}`: {message}")
            }
            Error::Upstream(e) => write!(f, "upstream read failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Upstream(e) => Some(e),
            Error::InvalidParameter { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Upstream(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Upstream(inner) => inner,
            other @ Error::InvalidParameter { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, other.to_string())
            }
        }
    }
}
