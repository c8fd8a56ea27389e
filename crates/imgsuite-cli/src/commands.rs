pub mod configure;
pub mod provision;
pub mod register;

use std::path::PathBuf;

use imgsuite::config::{parse_definition, Config, Version};

pub use configure::ConfigureArgs;
pub use provision::ProvisionArgs;
pub use register::RegisterArgs;

#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommands,
    #[command(flatten)]
    pub globals: GlobalArgs,
}

#[derive(Debug, clap::Args)]
#[non_exhaustive]
pub struct GlobalArgs {
    /// Print debug information; can be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Do not print logs to console.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommands {
    /// Make reference datasets available under the build tree.
    #[command(short_flag = 'P')]
    Provision(ProvisionArgs),
    /// Register the test suite's tests and write them as a CTest manifest.
    #[command(short_flag = 'R')]
    Register(RegisterArgs),
    /// Provision datasets, then register tests.
    Configure(ConfigureArgs),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
#[non_exhaustive]
pub struct ConfigArgs {
    /// Root of the library's source tree
    #[arg(long, default_value = ".")]
    pub source_root: PathBuf,
    /// Root of the build tree
    #[arg(long, default_value = "build")]
    pub build_root: PathBuf,
    /// Directory searched for existing copies of datasets [default: parent of source root]
    #[arg(long)]
    pub local_testdata_root: Option<PathBuf>,
    /// Download missing datasets with git
    #[arg(long)]
    pub download_missing: bool,
    /// Interpreter running the test driver
    #[arg(long)]
    pub interpreter: Option<String>,
    /// Active configuration, for backends building several configurations in one tree
    #[arg(long, value_name = "NAME")]
    pub multi_config: Option<String>,
    /// Version of the library under test, in format of 'MAJOR.MINOR'
    #[arg(long, value_parser = parse_version)]
    pub lib_version: Option<Version>,
    /// Define a configuration variable; can be repeated.
    #[arg(short = 'D', value_name = "NAME=VALUE", value_parser = parse_definition)]
    pub define: Vec<(String, String)>,
}

impl ConfigArgs {
    pub fn build(&self) -> Config {
        let mut builder = Config::builder(&self.source_root, &self.build_root);
        if let Some(root) = &self.local_testdata_root {
            builder = builder.local_testdata_root(root);
        }
        if self.download_missing {
            builder = builder.download_missing(true);
        }
        if let Some(interpreter) = &self.interpreter {
            builder = builder.interpreter(interpreter);
        }
        if let Some(config_name) = &self.multi_config {
            builder = builder.multi_config(config_name);
        }
        if let Some(version) = self.lib_version {
            builder = builder.version(version);
        }
        for (name, value) in &self.define {
            builder = builder.variable(name, value);
        }
        builder.build()
    }
}

fn parse_version(s: &str) -> Result<Version, imgsuite::config::Error> {
    s.parse()
}
