use clap::Parser;

use super::ConfigArgs;

#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Datasets to provision [default: all known datasets]
    pub datasets: Vec<String>,
}
