//! Unified error type.

use std::fmt;
use std::path::PathBuf;

/// The error type returned by shellac's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: binding the listen socket, and the two startup
/// conditions that must prevent the server from accepting traffic at all —
/// an unreadable shell document and a shell without the configured mount
/// element. There is no degraded mode for "no shell available".
#[derive(Debug)]
pub enum Error {
    /// Binding or accepting on the listen socket failed.
    Io(std::io::Error),
    /// The shell document could not be read at startup.
    ShellRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The shell document has no element matching the configured selector,
    /// or the element is never closed.
    MountNotFound { selector: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::ShellRead { path, source } => {
                write!(f, "failed to read shell document {}: {source}", path.display())
            }
            Self::MountNotFound { selector } => {
                write!(f, "shell document has no usable mount element matching `{selector}`")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ShellRead { source, .. } => Some(source),
            Self::MountNotFound { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
