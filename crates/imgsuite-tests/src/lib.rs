use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use imgsuite::config::{Config, ConfigBuilder, EnvScope};

pub fn debug_enabled() -> bool {
    std::env::var("IMGSUITE_TEST_DEBUG").is_ok()
}

/// Temporary source, build and local testdata trees.
pub struct Fixture {
    tmp: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("cannot create temporary directory");
        let fixture = Self { tmp };
        std::fs::create_dir_all(fixture.suite_root()).unwrap();
        std::fs::create_dir_all(fixture.local_root()).unwrap();
        if debug_enabled() {
            eprintln!("Fixture at {}", fixture.root().display());
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn source_root(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn suite_root(&self) -> PathBuf {
        self.source_root().join("testsuite")
    }

    pub fn build_root(&self) -> PathBuf {
        self.root().join("build")
    }

    pub fn local_root(&self) -> PathBuf {
        self.root().join("local")
    }

    /// Config builder over this fixture, isolated from the process environment.
    pub fn config(&self) -> ConfigBuilder {
        Config::builder(self.source_root(), self.build_root())
            .local_testdata_root(self.local_root())
            .env(EnvScope::empty())
    }

    /// Creates a small dataset tree under the local testdata root.
    pub fn local_dataset(&self, name: &str) -> PathBuf {
        let dir = self.local_root().join(name);
        write_sample_tree(&dir);
        dir
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_sample_tree(dir: &Path) {
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("sample.exr"), b"exr").unwrap();
    std::fs::write(dir.join("nested/sample.tif"), b"tif").unwrap();
}

/// Relative paths of every entry under `dir`, following symlinks.
pub fn listing(dir: &Path) -> BTreeSet<PathBuf> {
    walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            entry.path().strip_prefix(dir).unwrap().to_path_buf()
        })
        .collect()
}

/// Directory linker that always fails, as on filesystems without symlink support.
pub struct NoSymlinks;

impl imgsuite::provision::DirLinker for NoSymlinks {
    fn link_dir(&self, _target: &Path, _link: &Path) -> std::io::Result<()> {
        tracing::debug!("Refusing to create symlink");
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "symlinks are not supported",
        ))
    }
}
