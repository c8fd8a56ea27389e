use std::path::PathBuf;

use imgsuite_config::Config;

pub const BROKEN_MARKER: &str = "-broken";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Label {
    Normal,
    Broken,
}

/// One declared test, before registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSpec {
    pub name: String,
    pub suffix: Option<String>,
    pub test_name: Option<String>,
    pub label: Label,
}

impl TestSpec {
    /// Name the test is registered under: the override or the name, then the suffix, then the
    /// broken marker.
    pub fn final_name(&self) -> String {
        let mut out = self.test_name.clone().unwrap_or_else(|| self.name.clone());
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
        if self.label == Label::Broken {
            out.push_str(BROKEN_MARKER);
        }
        out
    }

    /// Directory holding the test's fixtures.
    pub fn source_dir(&self, config: &Config) -> PathBuf {
        config.test_source_dir(&self.name)
    }

    /// Isolated directory the test runs in.
    pub fn working_dir(&self, config: &Config) -> PathBuf {
        let mut dir_name = self.name.clone();
        if let Some(suffix) = &self.suffix {
            dir_name.push_str(suffix);
        }
        config.test_working_dir(&dir_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use imgsuite_config::EnvScope;

    use super::*;

    fn spec(name: &str) -> TestSpec {
        TestSpec {
            name: name.into(),
            suffix: None,
            test_name: None,
            label: Label::Normal,
        }
    }

    #[test]
    fn plain_name() {
        assert_eq!(spec("png").final_name(), "png");
    }

    #[test]
    fn override_then_suffix_then_marker() {
        let spec = TestSpec {
            suffix: Some(".batch".into()),
            test_name: Some("texture-big".into()),
            label: Label::Broken,
            ..spec("texture-crop")
        };
        assert_eq!(spec.final_name(), "texture-big.batch-broken");
    }

    #[test]
    fn directories() {
        let config = imgsuite_config::Config::builder("/src/imglib", "/build")
            .env(EnvScope::empty())
            .build();
        let spec = TestSpec {
            suffix: Some(".batch".into()),
            test_name: Some("renamed".into()),
            label: Label::Broken,
            ..spec("oiiotool")
        };
        assert_eq!(spec.source_dir(&config), Path::new("/src/imglib/testsuite/oiiotool"));
        assert_eq!(spec.working_dir(&config), Path::new("/build/testsuite/oiiotool.batch"));
    }
}
