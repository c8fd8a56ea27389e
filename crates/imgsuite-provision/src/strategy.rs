use std::path::Path;

use imgsuite_config::Config;

use crate::copy::copy_dir_all;
use crate::{Dataset, DirLinker, MissingReason, Provisioned, Vcs};

/// A way of making a dataset directory available under the working root.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Symlink the copy found under the local testdata root.
    LinkLocal,
    /// Copy the tree found under the local testdata root.
    CopyLocal,
    /// The dataset is already under the working root.
    AlreadyPresent,
    /// Shallow-clone the dataset's remote, if downloading is enabled.
    Fetch,
}

/// Result of trying one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Succeeded(Provisioned),
    NotApplicable,
    /// The strategy applied but did not produce the dataset. Dispatch ends here unless
    /// [`Strategy::falls_back`] says otherwise.
    Failed(MissingReason),
}

pub(crate) struct Context<'a> {
    pub config: &'a Config,
    pub linker: &'a dyn DirLinker,
    pub vcs: &'a dyn Vcs,
}

impl Strategy {
    /// Evaluation order; the first strategy that applies decides the outcome.
    pub const ORDER: [Strategy; 4] = [
        Strategy::LinkLocal,
        Strategy::CopyLocal,
        Strategy::AlreadyPresent,
        Strategy::Fetch,
    ];

    /// Whether a failure of this strategy continues with the next one.
    ///
    /// Linking and copying form one branch: a failed link falls back to a copy, but a failed copy
    /// ends provisioning without trying to download.
    #[inline]
    pub fn falls_back(self) -> bool {
        matches!(self, Self::LinkLocal)
    }

    pub(crate) fn attempt(self, cx: &Context<'_>, dataset: &Dataset) -> Attempt {
        let name = dataset.name.as_str();
        let dest = cx.config.dataset_dir(name);
        let local = cx.config.local_dataset_dir(name);

        match self {
            Self::LinkLocal => {
                if !local.is_dir() || dest.is_dir() {
                    return Attempt::NotApplicable;
                }
                let result = ensure_parent(&dest)
                    .and_then(|_| remove_stale_link(&dest))
                    .and_then(|_| cx.linker.link_dir(&local, &dest));
                match result {
                    Ok(()) => {
                        tracing::info!(
                            dataset = name,
                            from = %local.display(),
                            "Linked dataset from local testdata root"
                        );
                        Attempt::Succeeded(Provisioned::Linked)
                    }
                    Err(e) => {
                        tracing::debug!(dataset = name, %e, "Symlink failed; falling back to copy");
                        Attempt::Failed(MissingReason::LinkFailed)
                    }
                }
            }
            Self::CopyLocal => {
                if !local.is_dir() || dest.is_dir() {
                    return Attempt::NotApplicable;
                }
                let existed = std::fs::symlink_metadata(&dest).is_ok();
                let result = ensure_parent(&dest)
                    .map_err(crate::Error::from)
                    .and_then(|_| copy_dir_all(&local, &dest));
                match result {
                    Ok(files) => {
                        tracing::info!(
                            dataset = name,
                            files,
                            from = %local.display(),
                            "Copied dataset from local testdata root"
                        );
                        Attempt::Succeeded(Provisioned::Copied)
                    }
                    Err(e) => {
                        tracing::warn!(
                            dataset = name,
                            %e,
                            "Failed to copy dataset from local testdata root"
                        );
                        if !existed {
                            remove_partial(&dest);
                        }
                        Attempt::Failed(MissingReason::CopyFailed)
                    }
                }
            }
            Self::AlreadyPresent => {
                if dest.is_dir() {
                    tracing::info!(dataset = name, "Dataset already present");
                    Attempt::Succeeded(Provisioned::AlreadyPresent)
                } else {
                    Attempt::NotApplicable
                }
            }
            Self::Fetch => {
                let Some(remote) = &dataset.remote else {
                    return Attempt::NotApplicable;
                };
                if !cx.config.download_missing() || dest.is_dir() {
                    return Attempt::NotApplicable;
                }
                if !cx.vcs.is_available() {
                    tracing::warn!(
                        dataset = name,
                        "Cannot download dataset: no version-control tool available"
                    );
                    return Attempt::Failed(MissingReason::VcsUnavailable);
                }

                let branch = remote.branch();
                tracing::info!(dataset = name, url = %remote.url, branch, "Downloading dataset");
                let result = ensure_parent(&dest)
                    .map_err(crate::Error::from)
                    .and_then(|_| cx.vcs.shallow_clone(&remote.url, branch, &dest));
                match result {
                    Ok(()) => Attempt::Succeeded(Provisioned::Fetched),
                    Err(e) => {
                        tracing::warn!(
                            dataset = name,
                            url = %remote.url,
                            %e,
                            "Failed to download dataset"
                        );
                        Attempt::Failed(MissingReason::FetchFailed)
                    }
                }
            }
        }
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Removes a symlink at `path` that does not resolve to a directory.
///
/// Such a link is left over from an earlier run whose link target went away.
fn remove_stale_link(path: &Path) -> std::io::Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    if !meta.file_type().is_symlink() || path.is_dir() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "Replacing stale symlink");
    std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path))
}

fn remove_partial(path: &Path) {
    if std::fs::symlink_metadata(path).is_err() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(path) {
        tracing::warn!(path = %path.display(), %e, "Failed to remove partial copy");
    }
}
