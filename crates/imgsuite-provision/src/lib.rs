//! Provisioning of reference datasets for the image test suite.
//!
//! [`Provisioner::ensure_dataset`] makes `working_root/<name>` available using the cheapest
//! strategy that applies, in this order:
//!
//! 1. symlink the copy under the local testdata root;
//! 2. copy it, if the symlink could not be created (a failed copy ends provisioning);
//! 3. accept a directory that is already there;
//! 4. shallow-clone the dataset's remote, only if downloading missing data is enabled.
//!
//! If none succeeds the dataset is reported [missing][Outcome::Missing]. Missing datasets are
//! never fatal; tests that need them skip themselves at registration time.
//!
//! ```no_run
//! # use imgsuite_config::Config;
//! # use imgsuite_provision::{Dataset, Provisioner};
//! let config = Config::builder("/src/imglib", "/build").build();
//! let provisioner = Provisioner::new(&config);
//! let outcome = provisioner.ensure_dataset(&Dataset::local("fits-images"));
//! println!("fits-images: {outcome}");
//! ```
use imgsuite_config::Config;

mod copy;
mod dataset;
mod error;
mod linker;
mod strategy;
mod vcs;

pub use dataset::{known_datasets, Dataset, Remote};
pub use error::{Error, Result};
pub use linker::{DirLinker, SymlinkLinker};
pub use strategy::{Attempt, Strategy};
pub use vcs::{GitCli, Vcs};

use strategy::Context;

/// How a dataset was made available.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Provisioned {
    Linked,
    Copied,
    AlreadyPresent,
    Fetched,
}

/// Why a dataset is not available.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// Not found locally, and the dataset has no remote to fetch from.
    NoRemote,
    /// Not found locally; the dataset has a remote but downloading is not enabled.
    DownloadDisabled,
    /// Downloading is enabled but no version-control tool could be run.
    VcsUnavailable,
    FetchFailed,
    /// Symlinking the local copy failed. Only reported if the copy fallback did not apply.
    LinkFailed,
    CopyFailed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Provisioned(Provisioned),
    Missing(MissingReason),
}

impl Outcome {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Provisioned(_))
    }
}

impl std::fmt::Display for Provisioned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linked => write!(f, "linked from local testdata root"),
            Self::Copied => write!(f, "copied from local testdata root"),
            Self::AlreadyPresent => write!(f, "already present"),
            Self::Fetched => write!(f, "downloaded"),
        }
    }
}

impl std::fmt::Display for MissingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRemote => write!(f, "not found locally and no remote is known"),
            Self::DownloadDisabled => {
                write!(f, "not found locally and downloading missing test data is disabled")
            }
            Self::VcsUnavailable => write!(f, "no version-control tool available to download it"),
            Self::FetchFailed => write!(f, "download failed"),
            Self::LinkFailed => write!(f, "could not link local copy"),
            Self::CopyFailed => write!(f, "could not copy local copy"),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provisioned(p) => write!(f, "{p}"),
            Self::Missing(reason) => write!(f, "missing ({reason})"),
        }
    }
}

/// Resolves datasets to directories under the working root.
pub struct Provisioner<'c> {
    config: &'c Config,
    linker: Box<dyn DirLinker + 'c>,
    vcs: Box<dyn Vcs + 'c>,
}

impl std::fmt::Debug for Provisioner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("working_root", &self.config.working_root())
            .field("local_testdata_root", &self.config.local_testdata_root())
            .field("download_missing", &self.config.download_missing())
            .finish_non_exhaustive()
    }
}

impl<'c> Provisioner<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            linker: Box::new(SymlinkLinker),
            vcs: Box::new(GitCli::default()),
        }
    }

    /// Replaces the directory linker.
    pub fn linker(mut self, linker: impl DirLinker + 'c) -> Self {
        self.linker = Box::new(linker);
        self
    }

    /// Replaces the version-control tool used for downloads.
    pub fn vcs(mut self, vcs: impl Vcs + 'c) -> Self {
        self.vcs = Box::new(vcs);
        self
    }

    /// Makes `dataset` available under the working root if possible.
    pub fn ensure_dataset(&self, dataset: &Dataset) -> Outcome {
        let _guard = tracing::debug_span!("Ensure dataset", dataset = %dataset.name).entered();

        let cx = Context {
            config: self.config,
            linker: &*self.linker,
            vcs: &*self.vcs,
        };

        let mut last_failure = None;
        for strategy in Strategy::ORDER {
            match strategy.attempt(&cx, dataset) {
                Attempt::Succeeded(status) => return Outcome::Provisioned(status),
                Attempt::NotApplicable => {}
                Attempt::Failed(reason) => {
                    tracing::debug!(?strategy, %reason, "Strategy failed");
                    last_failure = Some(reason);
                    if !strategy.falls_back() {
                        break;
                    }
                }
            }
        }

        let reason = last_failure.unwrap_or(if dataset.remote.is_some() {
            MissingReason::DownloadDisabled
        } else {
            MissingReason::NoRemote
        });
        tracing::warn!(
            dataset = %dataset.name,
            %reason,
            "Missing test data; tests requiring it will be skipped"
        );
        Outcome::Missing(reason)
    }

    /// Ensures each dataset in order, returning one report entry per dataset.
    pub fn provision(&self, datasets: &[Dataset]) -> Vec<(String, Outcome)> {
        datasets
            .iter()
            .map(|dataset| (dataset.name.clone(), self.ensure_dataset(dataset)))
            .collect()
    }

    /// Ensures every dataset the test suite knows about.
    pub fn provision_known_datasets(&self) -> Vec<(String, Outcome)> {
        self.provision(&known_datasets(self.config.version()))
    }
}
