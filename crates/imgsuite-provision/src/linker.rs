use std::path::Path;

/// Creates a directory link at `link` pointing to `target`.
pub trait DirLinker {
    fn link_dir(&self, target: &Path, link: &Path) -> std::io::Result<()>;
}

/// Uses the platform's directory symlink.
#[derive(Debug, Default, Copy, Clone)]
pub struct SymlinkLinker;

impl DirLinker for SymlinkLinker {
    #[cfg(unix)]
    fn link_dir(&self, target: &Path, link: &Path) -> std::io::Result<()> {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    fn link_dir(&self, target: &Path, link: &Path) -> std::io::Result<()> {
        std::os::windows::fs::symlink_dir(target, link)
    }

    #[cfg(not(any(unix, windows)))]
    fn link_dir(&self, _target: &Path, _link: &Path) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "directory symlinks are not supported on this platform",
        ))
    }
}

impl<T: DirLinker + ?Sized> DirLinker for &T {
    fn link_dir(&self, target: &Path, link: &Path) -> std::io::Result<()> {
        (**self).link_dir(target, link)
    }
}
