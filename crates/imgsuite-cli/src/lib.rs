pub mod commands;
pub mod configure;
pub mod error;
mod manifest;
pub mod provision;
pub mod register;

pub use commands::{Args, Subcommands};
pub use error::Error;

type Result<T> = std::result::Result<T, Error>;
