//! Configuration consumed by imgsuite's test registrar and data provisioner.
//!
//! All settings live in one [`Config`] value built at the start of a configuration pass. Settings
//! that can also come from the process environment are resolved by [`resolve`] in a fixed order:
//! explicit parameter, then environment, then default.
mod config;
mod error;
mod resolve;
mod scope;
pub mod truth;
mod version;

pub use config::{Config, ConfigBuilder, ENV_DOWNLOAD_MISSING, ENV_LOCAL_TESTDATA_ROOT};
pub use error::{Error, Result};
pub use resolve::{resolve, Resolved, Source};
pub use scope::{parse_definition, EnvScope, Scope, Variables};
pub use version::Version;
