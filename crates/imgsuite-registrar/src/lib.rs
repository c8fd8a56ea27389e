//! Conditional registration of the image test suite's test cases.
//!
//! A [`Batch`] names one or more tests sharing enablement conditions. [`Registrar::register`]
//! decides what happens to it:
//!
//! - an enable-variable explicitly set to a false value (in the build configuration or the
//!   process environment) skips the whole batch;
//! - a required dataset directory that does not exist skips the whole batch, pointing at where
//!   the data can be obtained;
//! - a found-variable that is not true registers the batch with the `-broken` marker, so the
//!   failure stays visible in reports;
//! - otherwise every test is registered normally.
//!
//! Each registered test gets its own working directory and environment, and is handed to a
//! [`TestExecutor`].
use std::path::{Path, PathBuf};

use imgsuite_config::Config;

mod batch;
mod env;
mod error;
mod executor;
mod spec;

pub use batch::{known_batches, Batch};
pub use env::EnvironmentBinding;
pub use error::{Error, Result};
pub use executor::{CTestManifest, Registration, TestExecutor};
pub use spec::{Label, TestSpec, BROKEN_MARKER};

pub const ENV_COLOR_CONFIG: &str = "OCIO";
pub const DEFAULT_COLOR_CONFIG: &str = "ocio://default";
pub const ENV_TESTSUITE_ROOT: &str = "IMGSUITE_TESTSUITE_ROOT";
pub const ENV_TESTSUITE_SRC: &str = "IMGSUITE_TESTSUITE_SRC";
pub const ENV_TESTSUITE_CUR: &str = "IMGSUITE_TESTSUITE_CUR";
pub const ENV_TESTSUITE_IMAGEDIR: &str = "IMGSUITE_TESTSUITE_IMAGEDIR";

pub const LABEL_SUITE: &str = "imgsuite";
pub const LABEL_BROKEN: &str = "broken";

/// What happened to a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Registered {
        names: Vec<String>,
        broken: bool,
    },
    /// Skipped because enable-variables were explicitly false.
    Disabled {
        tests: Vec<String>,
        variables: Vec<String>,
    },
    /// Skipped because the required dataset directory does not exist.
    MissingData {
        tests: Vec<String>,
        directory: PathBuf,
        url: Option<String>,
    },
}

impl BatchOutcome {
    pub fn registered(&self) -> &[String] {
        match self {
            Self::Registered { names, .. } => names,
            _ => &[],
        }
    }
}

impl std::fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registered { names, broken } => {
                write!(f, "registered {}", names.join(", "))?;
                if *broken {
                    write!(f, " (broken)")?;
                }
                Ok(())
            }
            Self::Disabled { tests, variables } => write!(
                f,
                "skipping {}: disabled by {}",
                tests.join(", "),
                variables.join(", ")
            ),
            Self::MissingData {
                tests,
                directory,
                url,
            } => {
                write!(
                    f,
                    "skipping {}: missing test data {}",
                    tests.join(", "),
                    directory.display()
                )?;
                if let Some(url) = url {
                    write!(f, "; it can be obtained from {url}")?;
                }
                Ok(())
            }
        }
    }
}

/// Registers test batches against a [`TestExecutor`].
#[derive(Debug)]
pub struct Registrar<'c> {
    config: &'c Config,
}

impl<'c> Registrar<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub fn register<E: TestExecutor + ?Sized>(
        &self,
        batch: &Batch,
        executor: &mut E,
    ) -> BatchOutcome {
        let _guard = tracing::debug_span!("Register batch", tests = ?batch.names).entered();
        let config = self.config;

        let mut broken = false;
        for var in &batch.found_vars {
            if !config.is_found(var) {
                tracing::debug!(var = %var, "Found-variable is not set; marking batch broken");
                broken = true;
            }
        }

        let disabled = batch
            .enable_vars
            .iter()
            .filter(|var| config.is_disabled(var))
            .cloned()
            .collect::<Vec<_>>();
        if !disabled.is_empty() {
            let outcome = BatchOutcome::Disabled {
                tests: batch.names.clone(),
                variables: disabled,
            };
            tracing::warn!("{outcome}");
            return outcome;
        }

        let image_dir = batch.image_dir.as_deref().map(|dir| self.image_dir(dir));
        if let Some(dir) = &image_dir {
            if !dir.is_dir() {
                let outcome = BatchOutcome::MissingData {
                    tests: batch.names.clone(),
                    directory: dir.clone(),
                    url: batch.url.clone(),
                };
                tracing::warn!("{outcome}");
                return outcome;
            }
        }

        let label = if broken { Label::Broken } else { Label::Normal };
        let mut names = Vec::with_capacity(batch.names.len());
        for name in &batch.names {
            let spec = TestSpec {
                name: name.clone(),
                suffix: batch.suffix.clone(),
                test_name: batch.test_name.clone(),
                label,
            };
            match self.register_one(&spec, batch, image_dir.as_deref(), executor) {
                Ok(final_name) => names.push(final_name),
                Err(e) => {
                    tracing::warn!(test = %spec.final_name(), %e, "Failed to register test");
                }
            }
        }

        let outcome = BatchOutcome::Registered { names, broken };
        tracing::debug!("{outcome}");
        outcome
    }

    /// Registers each batch in order.
    pub fn register_all<E: TestExecutor + ?Sized>(
        &self,
        batches: &[Batch],
        executor: &mut E,
    ) -> Vec<BatchOutcome> {
        batches
            .iter()
            .map(|batch| self.register(batch, executor))
            .collect()
    }

    /// Builds the registration for one test, without side effects.
    pub fn registration(
        &self,
        spec: &TestSpec,
        batch: &Batch,
        image_dir: Option<&Path>,
    ) -> Registration {
        let config = self.config;
        let working_dir = spec.working_dir(config);

        let mut command = vec![
            config.interpreter().to_owned(),
            config.driver().to_string_lossy().into_owned(),
            working_dir.to_string_lossy().into_owned(),
        ];
        if let Some(config_name) = config.multi_config() {
            // Multi-config backends build into per-configuration subdirectories; the driver
            // needs both to find the binaries under test.
            command.extend([
                String::from("--devenv-config"),
                config_name.to_owned(),
                String::from("--solution-path"),
                config.build_root().to_string_lossy().into_owned(),
            ]);
        }

        let mut environment = EnvironmentBinding::new();
        environment.set(ENV_COLOR_CONFIG, DEFAULT_COLOR_CONFIG);
        environment.extend(batch.env.iter().cloned());
        environment
            .set(ENV_TESTSUITE_ROOT, config.suite_root().to_string_lossy())
            .set(ENV_TESTSUITE_SRC, spec.source_dir(config).to_string_lossy())
            .set(ENV_TESTSUITE_CUR, working_dir.to_string_lossy());
        if let Some(dir) = image_dir {
            environment.set(ENV_TESTSUITE_IMAGEDIR, dir.to_string_lossy());
        }

        let mut labels = vec![String::from(LABEL_SUITE)];
        if spec.label == Label::Broken {
            labels.push(String::from(LABEL_BROKEN));
        }

        Registration {
            name: spec.final_name(),
            command,
            working_dir,
            environment,
            labels,
        }
    }

    fn register_one<E: TestExecutor + ?Sized>(
        &self,
        spec: &TestSpec,
        batch: &Batch,
        image_dir: Option<&Path>,
        executor: &mut E,
    ) -> Result<String> {
        let registration = self.registration(spec, batch, image_dir);
        std::fs::create_dir_all(&registration.working_dir)?;

        let name = registration.name.clone();
        executor.register(registration)?;
        tracing::info!(test = %name, "Registered test");
        Ok(name)
    }

    fn image_dir(&self, dir: &str) -> PathBuf {
        let path = Path::new(dir);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.dataset_dir(dir)
        }
    }
}
