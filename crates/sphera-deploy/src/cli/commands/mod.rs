//! CLI command definitions and argument parsing

mod config;
mod deploy;

pub use config::ConfigCommand;
pub use deploy::DeployCommand;
