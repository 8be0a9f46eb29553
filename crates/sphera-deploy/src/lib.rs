//! Sphera contract deployment tool
//!
//! Resolves compiled contract factories, then deploys them one at a time to a
//! configured EVM network and reports each address as it is confirmed.

pub mod cli;
pub mod core;
pub mod operations;
pub mod types;

pub use core::{ArtifactStore, ContractFactory, DeploymentBackend, Provider};
pub use operations::{ContractDeployer, DeploymentOptions};
pub use types::{DeploymentRecord, DeploymentReport, Error, ErrorKind, Result};
