#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Io(std::io::Error),
    Walk(walkdir::Error),
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Walk(e) => Some(e),
            Self::CommandFailed { .. } => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Walk(e) => write!(f, "failed to walk directory tree: {e}"),
            Self::CommandFailed { program, status } => {
                write!(f, "`{program}` exited with {status}")
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Self::Walk(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
