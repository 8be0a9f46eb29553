//! Configuration builder for creating test and development configurations.
//!
//! This module provides utilities for constructing Config instances with
//! sensible defaults, particularly useful for testing scenarios.

use crate::{
	CompilerConfig, Config, ContractSpec, CustomChain, DeployConfig, EvmVersion, ExplorerConfig,
	NetworkProfile, OptimizerConfig, SecretString,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Builder for creating `Config` instances with a fluent API.
///
/// Starts from an empty plan and no networks, so tests only
/// spell out what they care about.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	compiler_version: String,
	optimizer_runs: Option<u32>,
	evm_version: EvmVersion,
	networks: BTreeMap<String, NetworkProfile>,
	explorer: ExplorerConfig,
	artifacts_dir: PathBuf,
	confirmations: u64,
	confirmation_timeout_seconds: u64,
	contracts: Vec<ContractSpec>,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` with default values suitable for testing.
	pub fn new() -> Self {
		Self {
			compiler_version: "0.8.28".to_string(),
			optimizer_runs: None,
			evm_version: EvmVersion::default(),
			networks: BTreeMap::new(),
			explorer: ExplorerConfig::default(),
			artifacts_dir: PathBuf::from("artifacts"),
			confirmations: 1,
			confirmation_timeout_seconds: 30,
			contracts: Vec::new(),
		}
	}

	/// Sets the compiler version.
	pub fn compiler_version(mut self, version: impl Into<String>) -> Self {
		self.compiler_version = version.into();
		self
	}

	/// Enables the optimizer with the given run count.
	pub fn optimizer_runs(mut self, runs: u32) -> Self {
		self.optimizer_runs = Some(runs);
		self
	}

	/// Sets the EVM target.
	pub fn evm_version(mut self, version: EvmVersion) -> Self {
		self.evm_version = version;
		self
	}

	/// Adds a network profile. Blank keys are dropped, as when parsing.
	pub fn network(mut self, name: &str, url: Option<&str>, keys: &[&str]) -> Self {
		let profile = NetworkProfile {
			name: name.to_string(),
			url: url.map(str::to_string),
			accounts: keys
				.iter()
				.map(|key| SecretString::from(*key))
				.filter(|key| !key.is_blank())
				.collect(),
			chain_id: None,
		};
		self.networks.insert(name.to_string(), profile);
		self
	}

	/// Adds an explorer custom chain entry for a network.
	pub fn custom_chain(mut self, network: &str, chain_id: u64, browser_url: &str) -> Self {
		self.explorer.custom_chains.push(CustomChain {
			network: network.to_string(),
			chain_id,
			api_url: format!("{}/api", browser_url.trim_end_matches('/')),
			browser_url: browser_url.to_string(),
		});
		self
	}

	/// Sets the artifacts directory.
	pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.artifacts_dir = dir.into();
		self
	}

	/// Sets the number of confirmations to wait for.
	pub fn confirmations(mut self, confirmations: u64) -> Self {
		self.confirmations = confirmations;
		self
	}

	/// Sets the confirmation timeout in seconds.
	pub fn confirmation_timeout_seconds(mut self, seconds: u64) -> Self {
		self.confirmation_timeout_seconds = seconds;
		self
	}

	/// Appends a contract to the deployment plan.
	pub fn contract(mut self, spec: ContractSpec) -> Self {
		self.contracts.push(spec);
		self
	}

	/// Builds the final `Config` instance.
	pub fn build(self) -> Config {
		Config {
			compiler: CompilerConfig {
				version: self.compiler_version,
				optimizer: match self.optimizer_runs {
					Some(runs) => OptimizerConfig {
						enabled: true,
						runs,
					},
					None => OptimizerConfig::default(),
				},
				evm_version: self.evm_version,
			},
			networks: self.networks,
			explorer: self.explorer,
			deploy: DeployConfig {
				artifacts_dir: self.artifacts_dir,
				confirmations: self.confirmations,
				confirmation_timeout_seconds: self.confirmation_timeout_seconds,
				contracts: self.contracts,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults() {
		let config = ConfigBuilder::new().build();
		assert_eq!(config.compiler.version, "0.8.28");
		assert!(!config.compiler.optimizer.enabled);
		assert!(config.networks.is_empty());
		assert_eq!(config.deploy.confirmations, 1);
	}

	#[test]
	fn test_builder_network_and_explorer() {
		let config = ConfigBuilder::new()
			.network("local", Some("http://127.0.0.1:8545"), &["0x01", ""])
			.custom_chain("local", 31337, "https://explorer.local/")
			.contract(ContractSpec::new("Counter"))
			.build();

		let local = config.network("local").unwrap();
		assert_eq!(local.accounts.len(), 1);
		assert_eq!(config.chain_id("local"), Some(31337));
		let explorer = config.explorer_for("local").unwrap();
		assert_eq!(explorer.api_url.as_deref(), Some("https://explorer.local/api"));
		assert_eq!(config.deploy.contracts.len(), 1);
	}
}
