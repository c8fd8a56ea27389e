//! imgsuite adapts an image library's test suite to the build it runs against.
//!
//! It is organized into a few small crates: [`config`] holds the configuration shared by
//! everything else, [`provision`] makes reference datasets available under the build tree, and
//! [`registrar`] decides which tests are registered, and how.
//!
//! A configuration pass provisions datasets first, then registers tests, since registration
//! checks which dataset directories exist:
//!
//! ```no_run
//! use imgsuite::config::Config;
//! use imgsuite::registrar::Registration;
//!
//! let config = Config::builder("/src/imglib", "/build/imglib")
//!     .variable("PNG_FOUND", "1")
//!     .build();
//! let mut registered: Vec<Registration> = Vec::new();
//! let report = imgsuite::configure(&config, &mut registered);
//! for (name, outcome) in &report.datasets {
//!     println!("{name}: {outcome}");
//! }
//! ```
pub use imgsuite_config as config;
pub use imgsuite_provision as provision;
pub use imgsuite_registrar as registrar;

use config::Config;
use provision::{Outcome, Provisioner};
use registrar::{known_batches, BatchOutcome, Registrar, TestExecutor};

/// Result of a full configuration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub datasets: Vec<(String, Outcome)>,
    pub batches: Vec<BatchOutcome>,
}

impl Report {
    /// Names of every registered test.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.batches
            .iter()
            .flat_map(|b| b.registered())
            .map(String::as_str)
    }
}

/// Provisions the known datasets, then registers the known test batches.
pub fn configure<E: TestExecutor + ?Sized>(config: &Config, executor: &mut E) -> Report {
    configure_with(config, Provisioner::new(config), executor)
}

/// Like [`configure`], with a customized provisioner.
pub fn configure_with<E: TestExecutor + ?Sized>(
    config: &Config,
    provisioner: Provisioner<'_>,
    executor: &mut E,
) -> Report {
    let _guard = tracing::debug_span!("Configure test suite").entered();

    let datasets = provisioner.provision_known_datasets();
    let available = datasets.iter().filter(|(_, o)| o.is_available()).count();
    tracing::info!(available, total = datasets.len(), "Provisioned datasets");

    let batches = Registrar::new(config).register_all(&known_batches(), executor);
    let report = Report { datasets, batches };
    tracing::info!(tests = report.registered().count(), "Registered tests");
    report
}
