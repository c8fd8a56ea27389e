use std::path::PathBuf;

use clap::Parser;

use super::ConfigArgs;

#[derive(Debug, Parser)]
#[non_exhaustive]
pub struct RegisterArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Output CTest manifest [default: stdout]
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
}
