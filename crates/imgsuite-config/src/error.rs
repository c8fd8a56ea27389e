#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    InvalidVariable(String),
    InvalidVersion(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVariable(s) => {
                write!(f, "invalid variable definition `{s}`, expected NAME=VALUE")
            }
            Self::InvalidVersion(s) => {
                write!(f, "invalid version `{s}`, expected MAJOR.MINOR")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
