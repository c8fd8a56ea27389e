use std::path::Path;
use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Version-control tool used to fetch remote datasets.
pub trait Vcs {
    /// Returns whether the tool can be run at all.
    fn is_available(&self) -> bool;

    /// Fetches only the tip commit of `branch` into `dest`.
    fn shallow_clone(&self, url: &str, branch: &str, dest: &Path) -> Result<()>;
}

/// The `git` command line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Vcs for GitCli {
    fn is_available(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!(program = %self.program, %e, "Cannot run version-control tool");
                false
            }
        }
    }

    fn shallow_clone(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
        tracing::debug!(url, branch, dest = %dest.display(), "Running shallow clone");
        let status = Command::new(&self.program)
            .args(["clone", "--quiet", "--depth", "1", "--branch", branch, url])
            .arg(dest)
            .stdin(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl<T: Vcs + ?Sized> Vcs for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn shallow_clone(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
        (**self).shallow_clone(url, branch, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        let git = GitCli::new("imgsuite-no-such-vcs-program");
        assert!(!git.is_available());
    }
}
