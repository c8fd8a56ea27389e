use std::path::{Path, PathBuf};

use crate::resolve::{resolve, Resolved};
use crate::truth::parse_flag;
use crate::{EnvScope, Scope, Variables, Version};

/// Environment variable overriding the local testdata root.
pub const ENV_LOCAL_TESTDATA_ROOT: &str = "IMGSUITE_LOCAL_TESTDATA_ROOT";
/// Environment variable opting in to downloading missing datasets.
pub const ENV_DOWNLOAD_MISSING: &str = "IMGSUITE_DOWNLOAD_MISSING_TESTDATA";

const SUITE_DIR: &str = "testsuite";
const DRIVER: &str = "runtest.py";

/// Configuration shared by the registrar and the provisioner.
///
/// Constructed once per configuration pass with [`Config::builder`]; both components borrow it.
#[derive(Debug, Clone)]
pub struct Config {
    source_root: PathBuf,
    build_root: PathBuf,
    local_testdata_root: Resolved<PathBuf>,
    download_missing: Resolved<bool>,
    interpreter: String,
    multi_config: Option<String>,
    version: Version,
    variables: Variables,
    env: EnvScope,
}

impl Config {
    pub fn builder(source_root: impl Into<PathBuf>, build_root: impl Into<PathBuf>) -> ConfigBuilder {
        ConfigBuilder {
            source_root: source_root.into(),
            build_root: build_root.into(),
            local_testdata_root: None,
            download_missing: None,
            interpreter: None,
            multi_config: None,
            version: Version::default(),
            variables: Variables::new(),
            env: None,
        }
    }

    #[inline]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    #[inline]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Root of the test suite sources; each test's fixtures live in a subdirectory named after it.
    pub fn suite_root(&self) -> PathBuf {
        self.source_root.join(SUITE_DIR)
    }

    pub fn test_source_dir(&self, name: &str) -> PathBuf {
        self.suite_root().join(name)
    }

    /// Run-specific tree holding provisioned datasets and per-test working directories.
    pub fn working_root(&self) -> PathBuf {
        self.build_root.join(SUITE_DIR)
    }

    pub fn test_working_dir(&self, name: &str) -> PathBuf {
        self.working_root().join(name)
    }

    pub fn dataset_dir(&self, name: &str) -> PathBuf {
        self.working_root().join(name)
    }

    /// Generic per-test driver at the suite root.
    pub fn driver(&self) -> PathBuf {
        self.suite_root().join(DRIVER)
    }

    #[inline]
    pub fn local_testdata_root(&self) -> &Path {
        &self.local_testdata_root.value
    }

    pub fn local_dataset_dir(&self, name: &str) -> PathBuf {
        self.local_testdata_root.value.join(name)
    }

    #[inline]
    pub fn download_missing(&self) -> bool {
        self.download_missing.value
    }

    #[inline]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Name of the active configuration, if the test backend builds several configurations
    /// from one tree.
    #[inline]
    pub fn multi_config(&self) -> Option<&str> {
        self.multi_config.as_deref()
    }

    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    #[inline]
    pub fn env(&self) -> &EnvScope {
        &self.env
    }

    /// Returns whether `name` is set to a true value in the configuration scope.
    pub fn is_found(&self, name: &str) -> bool {
        self.variables.is_true(name)
    }

    /// Returns whether `name` is explicitly set to a false value in the configuration scope or
    /// in the process environment.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.variables.is_explicitly_false(name) || self.env.is_explicitly_false(name)
    }
}

#[derive(Debug)]
pub struct ConfigBuilder {
    source_root: PathBuf,
    build_root: PathBuf,
    local_testdata_root: Option<PathBuf>,
    download_missing: Option<bool>,
    interpreter: Option<String>,
    multi_config: Option<String>,
    version: Version,
    variables: Variables,
    env: Option<EnvScope>,
}

impl ConfigBuilder {
    pub fn local_testdata_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_testdata_root = Some(path.into());
        self
    }

    pub fn download_missing(mut self, enabled: bool) -> Self {
        self.download_missing = Some(enabled);
        self
    }

    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    pub fn multi_config(mut self, config_name: impl Into<String>) -> Self {
        self.multi_config = Some(config_name.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.set(name, value);
        self
    }

    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Uses the given environment instead of capturing the process environment.
    pub fn env(mut self, env: EnvScope) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Config {
        let env = self.env.unwrap_or_else(EnvScope::capture);

        let source_root = self.source_root;
        let local_testdata_root = resolve(
            self.local_testdata_root,
            &env,
            ENV_LOCAL_TESTDATA_ROOT,
            |raw| Some(PathBuf::from(raw)),
            || {
                source_root
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source_root.clone())
            },
        );
        let download_missing = resolve(
            self.download_missing,
            &env,
            ENV_DOWNLOAD_MISSING,
            parse_flag,
            || false,
        );

        tracing::debug!(
            local_testdata_root = %local_testdata_root.value.display(),
            source = ?local_testdata_root.source,
            "Resolved local testdata root"
        );
        tracing::debug!(
            download_missing = download_missing.value,
            source = ?download_missing.source,
            "Resolved download opt-in"
        );

        Config {
            source_root,
            build_root: self.build_root,
            local_testdata_root,
            download_missing,
            interpreter: self.interpreter.unwrap_or_else(|| String::from("python3")),
            multi_config: self.multi_config,
            version: self.version,
            variables: self.variables,
            env,
        }
    }
}
