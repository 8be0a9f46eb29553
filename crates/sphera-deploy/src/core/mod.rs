//! Core building blocks of the deployment tool
//!
//! Artifact resolution, network access and logging helpers.

pub mod artifacts;
pub mod blockchain;
pub mod logging;

pub use artifacts::{ArtifactStore, ContractFactory};
pub use blockchain::{DeploymentBackend, Provider};
