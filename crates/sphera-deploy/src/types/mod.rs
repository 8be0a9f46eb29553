//! Type definitions shared across the deployment tool
//!
//! Holds the error taxonomy and the records produced by a deployment run.

pub mod deployment;
pub mod error;

pub use deployment::{DeploymentReceipt, DeploymentRecord, DeploymentReport};
pub use error::{Error, ErrorKind, Result};
