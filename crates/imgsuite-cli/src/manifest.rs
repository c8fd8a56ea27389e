use std::io::Write;
use std::path::Path;

use imgsuite::registrar::CTestManifest;

use crate::{Error, Result};

pub(crate) type Manifest = CTestManifest<Box<dyn Write>>;

pub(crate) fn open(path: Option<&Path>) -> Result<Manifest> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(Error::CreateManifest)?;
            }
            let file = std::fs::File::create(path).map_err(Error::CreateManifest)?;
            tracing::debug!(path = %path.display(), "Writing test manifest");
            Box::new(std::io::BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };
    Ok(CTestManifest::new(writer))
}

pub(crate) fn finish(manifest: Manifest) -> Result<()> {
    manifest.finish().map(drop).map_err(Error::WriteManifest)
}

#[cfg(test)]
mod tests {
    use imgsuite::registrar::{EnvironmentBinding, Registration, TestExecutor};

    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn truncated_manifest_fails() {
        let mut manifest: Manifest = CTestManifest::new(Box::new(ClosedPipe));
        let registration = Registration {
            name: "png".into(),
            command: vec!["python3".into()],
            working_dir: "/build/testsuite/png".into(),
            environment: EnvironmentBinding::new(),
            labels: vec!["imgsuite".into()],
        };
        assert!(manifest.register(registration).is_err());
        assert!(matches!(finish(manifest), Err(Error::WriteManifest(_))));
    }
}
