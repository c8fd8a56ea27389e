#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    UnknownDataset(String),
    CreateManifest(std::io::Error),
    WriteManifest(imgsuite::registrar::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownDataset(name) => write!(f, "unknown dataset `{name}`"),
            Error::CreateManifest(e) => write!(f, "failed creating test manifest: {e}"),
            Error::WriteManifest(e) => write!(f, "failed writing test manifest: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnknownDataset(_) => None,
            Error::CreateManifest(e) => Some(e),
            Error::WriteManifest(e) => Some(e),
        }
    }
}
