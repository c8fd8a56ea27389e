use imgsuite_config::Version;

const DEFAULT_BRANCH: &str = "main";

/// A named directory tree of reference images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub remote: Option<Remote>,
}

/// Where a dataset can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub url: String,
    pub branch: Option<String>,
}

impl Dataset {
    /// Dataset that can only be satisfied by local reuse or prior presence.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: None,
        }
    }

    pub fn remote(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: Some(Remote {
                url: url.into(),
                branch: None,
            }),
        }
    }

    /// Sets the branch to fetch. Has no effect on datasets without a remote.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        if let Some(remote) = &mut self.remote {
            remote.branch = Some(branch.into());
        }
        self
    }
}

impl Remote {
    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }
}

/// Datasets used by the test suite.
///
/// The sample image repository keeps one branch per release series, selected from `version`.
pub fn known_datasets(version: Version) -> Vec<Dataset> {
    vec![
        Dataset::remote(
            "oiio-images",
            "https://github.com/AcademySoftwareFoundation/OpenImageIO-images.git",
        )
        .branch(format!("dev-{}.{}", version.major, version.minor)),
        Dataset::remote(
            "openexr-images",
            "https://github.com/AcademySoftwareFoundation/openexr-images.git",
        )
        .branch("main"),
        Dataset::local("fits-images"),
        Dataset::local("j2kp4files_v1_5"),
        Dataset::local("libtiffpic"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_branch() {
        let dataset = Dataset::remote("d", "https://example.invalid/d.git");
        assert_eq!(dataset.remote.unwrap().branch(), "main");
    }

    #[test]
    fn branch_on_local_dataset_is_ignored() {
        let dataset = Dataset::local("d").branch("dev");
        assert!(dataset.remote.is_none());
    }

    #[test]
    fn versioned_branch() {
        let datasets = known_datasets(Version::new(2, 5));
        let images = datasets.iter().find(|d| d.name == "oiio-images").unwrap();
        assert_eq!(images.remote.as_ref().unwrap().branch(), "dev-2.5");
        assert!(datasets.iter().any(|d| d.remote.is_none()));
    }
}
