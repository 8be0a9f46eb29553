//! High-level operations behind the CLI commands

pub mod deploy;

pub use deploy::{prepare_plan, ContractDeployer, DeploymentOptions, PreparedDeployment};
