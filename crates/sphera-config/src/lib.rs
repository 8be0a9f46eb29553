//! Configuration module for the Sphera deployment toolchain.
//!
//! This module describes everything the deployment routine needs to know
//! before it touches a network: compiler settings, named network profiles,
//! block-explorer verification metadata and the ordered deployment plan.
//!
//! Configuration is TOML. Before parsing, `${VAR}` placeholders are replaced
//! with environment values and `${VAR:-default}` falls back to `default`
//! (which may be empty). Optional settings such as RPC URLs and signing keys
//! are written with an empty default so that a missing variable produces an
//! unusable profile instead of a configuration error.

pub mod builders;
mod secret;

pub use builders::config::ConfigBuilder;
pub use secret::SecretString;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Built-in configuration for the Sphera networks and contract plan.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Solidity compiler settings the artifacts were built with.
	pub compiler: CompilerConfig,
	/// Network profiles keyed by network name.
	#[serde(default)]
	pub networks: BTreeMap<String, NetworkProfile>,
	/// Block-explorer verification metadata.
	#[serde(default)]
	pub explorer: ExplorerConfig,
	/// Deployment plan and confirmation policy.
	pub deploy: DeployConfig,
}

/// Solidity compiler settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerConfig {
	/// Exact solc version, e.g. `0.8.28`.
	pub version: String,
	#[serde(default)]
	pub optimizer: OptimizerConfig,
	/// Target EVM hardfork.
	#[serde(default)]
	pub evm_version: EvmVersion,
}

/// Optimizer settings passed to solc.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
	#[serde(default)]
	pub enabled: bool,
	/// Expected number of contract runs the optimizer tunes for.
	#[serde(default = "default_optimizer_runs")]
	pub runs: u32,
}

impl Default for OptimizerConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			runs: default_optimizer_runs(),
		}
	}
}

fn default_optimizer_runs() -> u32 {
	200
}

/// EVM hardfork targets understood by solc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvmVersion {
	Homestead,
	TangerineWhistle,
	SpuriousDragon,
	Byzantium,
	Constantinople,
	Petersburg,
	Istanbul,
	Berlin,
	London,
	Paris,
	Shanghai,
	#[default]
	Cancun,
	Prague,
}

impl EvmVersion {
	/// Returns the identifier solc uses for this hardfork.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Homestead => "homestead",
			Self::TangerineWhistle => "tangerineWhistle",
			Self::SpuriousDragon => "spuriousDragon",
			Self::Byzantium => "byzantium",
			Self::Constantinople => "constantinople",
			Self::Petersburg => "petersburg",
			Self::Istanbul => "istanbul",
			Self::Berlin => "berlin",
			Self::London => "london",
			Self::Paris => "paris",
			Self::Shanghai => "shanghai",
			Self::Cancun => "cancun",
			Self::Prague => "prague",
		}
	}
}

impl fmt::Display for EvmVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Connection profile for one named network.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkProfile {
	/// Network name; filled from the table key after parsing.
	#[serde(skip)]
	pub name: String,
	/// JSON-RPC endpoint. `None` when the environment did not provide one.
	#[serde(default, deserialize_with = "deserialize_optional_string")]
	pub url: Option<String>,
	/// Signing keys. Blank entries are dropped while parsing.
	#[serde(default, deserialize_with = "deserialize_accounts")]
	pub accounts: Vec<SecretString>,
	/// Expected chain id. Falls back to the explorer custom chain entry.
	#[serde(default)]
	pub chain_id: Option<u64>,
}

impl NetworkProfile {
	/// Returns true if at least one signing key is available.
	pub fn has_signer(&self) -> bool {
		!self.accounts.is_empty()
	}
}

/// Block-explorer verification metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerConfig {
	/// Explorer API keys keyed by network name.
	#[serde(default)]
	pub api_keys: BTreeMap<String, String>,
	/// Explorers for chains the verification plugin does not know natively.
	#[serde(default)]
	pub custom_chains: Vec<CustomChain>,
}

/// Explorer endpoints for a network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomChain {
	pub network: String,
	pub chain_id: u64,
	pub api_url: String,
	pub browser_url: String,
}

/// Explorer verification settings resolved for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerSettings {
	pub network: String,
	pub api_key: Option<String>,
	pub chain_id: Option<u64>,
	pub api_url: Option<String>,
	pub browser_url: Option<String>,
}

impl ExplorerSettings {
	/// Builds the explorer page URL for an address, if a browser URL is known.
	pub fn address_url(&self, address: &str) -> Option<String> {
		self.browser_url
			.as_ref()
			.map(|base| format!("{}/address/{}", base.trim_end_matches('/'), address))
	}
}

/// Deployment plan and confirmation policy.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
	/// Directory holding compiled contract artifacts.
	#[serde(default = "default_artifacts_dir")]
	pub artifacts_dir: PathBuf,
	/// Blocks required on top of the deployment transaction.
	#[serde(default = "default_confirmations")]
	pub confirmations: u64,
	/// Upper bound on each submission and each confirmation wait. `0` waits
	/// forever.
	#[serde(default = "default_confirmation_timeout_seconds")]
	pub confirmation_timeout_seconds: u64,
	/// Contracts to deploy, in order.
	#[serde(default)]
	pub contracts: Vec<ContractSpec>,
}

impl DeployConfig {
	/// Returns the confirmation timeout, or `None` when waiting is unbounded.
	pub fn confirmation_timeout(&self) -> Option<Duration> {
		match self.confirmation_timeout_seconds {
			0 => None,
			secs => Some(Duration::from_secs(secs)),
		}
	}
}

fn default_artifacts_dir() -> PathBuf {
	PathBuf::from("artifacts")
}

fn default_confirmations() -> u64 {
	1
}

fn default_confirmation_timeout_seconds() -> u64 {
	300
}

/// One entry of the deployment plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractSpec {
	/// Contract name as compiled, used to find the artifact.
	pub name: String,
	/// Name used in log output. Defaults to the contract name.
	#[serde(default)]
	pub label: Option<String>,
	/// Constructor arguments, coerced to the constructor's ABI types.
	#[serde(default)]
	pub args: Vec<ConstructorArg>,
}

impl ContractSpec {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			args: Vec::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_args(mut self, args: Vec<ConstructorArg>) -> Self {
		self.args = args;
		self
	}

	/// Name shown in log output.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}
}

/// A literal constructor argument.
///
/// Large integers such as token supplies must be written as strings; the
/// ABI type decides how the literal is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConstructorArg {
	Bool(bool),
	Integer(i64),
	Text(String),
}

impl fmt::Display for ConstructorArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{}", value),
			Self::Integer(value) => write!(f, "{}", value),
			Self::Text(value) => f.write_str(value),
		}
	}
}

impl From<&str> for ConstructorArg {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<String>::deserialize(deserializer)?;
	Ok(value.filter(|v| !v.trim().is_empty()))
}

fn deserialize_accounts<'de, D>(deserializer: D) -> Result<Vec<SecretString>, D::Error>
where
	D: Deserializer<'de>,
{
	let keys = Vec::<SecretString>::deserialize(deserializer)?;
	Ok(keys.into_iter().filter(|key| !key.is_blank()).collect())
}

/// Resolves environment variables in a string using the process environment.
///
/// See [`resolve_env_vars_with`].
pub fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	resolve_env_vars_with(input, |name| std::env::var(name).ok())
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value `lookup` returns for `VAR_NAME`.
/// Supports default values with `${VAR_NAME:-default_value}`.
///
/// Input strings are limited to 1MB.
pub fn resolve_env_vars_with<F>(input: &str, lookup: F) -> Result<String, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match lookup(var_name) {
			Some(v) => v,
			None => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)))
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving placeholders from the
	/// process environment.
	pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		tracing::debug!(path = %path.display(), "Loaded configuration file");
		content.parse()
	}

	/// Builds the built-in configuration from the process environment.
	pub fn builtin() -> Result<Self, ConfigError> {
		DEFAULT_CONFIG.parse()
	}

	/// Builds the built-in configuration from an explicit variable mapping.
	pub fn from_env_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
		Self::parse_with(DEFAULT_CONFIG, |name| vars.get(name).cloned())
	}

	/// Parses a TOML document, resolving placeholders through `lookup`.
	pub fn parse_with<F>(input: &str, lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let resolved = resolve_env_vars_with(input, lookup)?;
		let mut config: Config = toml::from_str(&resolved)?;
		for (name, profile) in config.networks.iter_mut() {
			profile.name = name.clone();
		}
		config.validate()?;
		Ok(config)
	}

	/// Looks up a network profile by name.
	pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
		self.networks.get(name)
	}

	/// Names of all configured networks, sorted.
	pub fn network_names(&self) -> Vec<&str> {
		self.networks.keys().map(String::as_str).collect()
	}

	/// Expected chain id for a network, from its profile or explorer entry.
	pub fn chain_id(&self, network: &str) -> Option<u64> {
		self.network(network)
			.and_then(|profile| profile.chain_id)
			.or_else(|| self.custom_chain(network).map(|chain| chain.chain_id))
	}

	/// Explorer verification settings for one network.
	///
	/// Returns `None` when the explorer section says nothing about it.
	pub fn explorer_for(&self, network: &str) -> Option<ExplorerSettings> {
		let api_key = self.explorer.api_keys.get(network).cloned();
		let chain = self.custom_chain(network);
		if api_key.is_none() && chain.is_none() {
			return None;
		}
		Some(ExplorerSettings {
			network: network.to_string(),
			api_key,
			chain_id: chain.map(|c| c.chain_id),
			api_url: chain.map(|c| c.api_url.clone()),
			browser_url: chain.map(|c| c.browser_url.clone()),
		})
	}

	/// Explorer verification settings for every network that has any.
	pub fn explorer_settings(&self) -> BTreeMap<String, ExplorerSettings> {
		let mut names: Vec<&String> = self.explorer.api_keys.keys().collect();
		names.extend(self.explorer.custom_chains.iter().map(|c| &c.network));
		names
			.into_iter()
			.filter_map(|name| self.explorer_for(name).map(|s| (name.clone(), s)))
			.collect()
	}

	fn custom_chain(&self, network: &str) -> Option<&CustomChain> {
		self.explorer
			.custom_chains
			.iter()
			.find(|chain| chain.network == network)
	}

	/// Validates the configuration.
	///
	/// RPC URLs and key formats are checked when connecting, not here.
	fn validate(&self) -> Result<(), ConfigError> {
		let version_re = Regex::new(r"^\d+\.\d+\.\d+$")
			.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;
		if !version_re.is_match(&self.compiler.version) {
			return Err(ConfigError::Validation(format!(
				"Compiler version '{}' must be MAJOR.MINOR.PATCH",
				self.compiler.version
			)));
		}

		if self.compiler.optimizer.enabled && self.compiler.optimizer.runs == 0 {
			return Err(ConfigError::Validation(
				"Optimizer runs must be greater than 0 when the optimizer is enabled".into(),
			));
		}

		for chain in &self.explorer.custom_chains {
			if !self.networks.contains_key(&chain.network) {
				return Err(ConfigError::Validation(format!(
					"Explorer custom chain references unknown network '{}'",
					chain.network
				)));
			}
			if let Some(declared) = self.networks[&chain.network].chain_id {
				if declared != chain.chain_id {
					return Err(ConfigError::Validation(format!(
						"Network '{}' declares chain id {} but its explorer entry says {}",
						chain.network, declared, chain.chain_id
					)));
				}
			}
		}

		if self.deploy.contracts.is_empty() {
			return Err(ConfigError::Validation(
				"Deployment plan must list at least one contract".into(),
			));
		}
		for contract in &self.deploy.contracts {
			if contract.name.trim().is_empty() {
				return Err(ConfigError::Validation(
					"Deployment plan entry has an empty contract name".into(),
				));
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string, resolving placeholders from the
/// process environment and validating the result.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_with(s, |name| std::env::var(name).ok())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_env_var_resolution() {
		let env = vars(&[("TEST_HOST", "localhost"), ("TEST_PORT", "5432")]);
		let input = "host = \"${TEST_HOST}:${TEST_PORT}\"";
		let result = resolve_env_vars_with(input, |k| env.get(k).cloned()).unwrap();
		assert_eq!(result, "host = \"localhost:5432\"");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars_with(input, |_| None).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_env_var_with_empty_default() {
		let input = "value = \"${MISSING_VAR:-}\"";
		let result = resolve_env_vars_with(input, |_| None).unwrap();
		assert_eq!(result, "value = \"\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${SPHERA_SURELY_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("SPHERA_SURELY_MISSING_VAR"));
	}

	#[test]
	fn test_builtin_compiler_settings() {
		let config = Config::from_env_map(&HashMap::new()).unwrap();
		assert_eq!(config.compiler.version, "0.8.28");
		assert!(config.compiler.optimizer.enabled);
		assert_eq!(config.compiler.optimizer.runs, 500);
		assert_eq!(config.compiler.evm_version, EvmVersion::Istanbul);
		assert_eq!(config.compiler.evm_version.to_string(), "istanbul");
	}

	#[test]
	fn test_builtin_networks_with_full_environment() {
		let env = vars(&[
			("RPC_BNB", "https://bsc.example"),
			("RPC_HADERA", "https://hedera.example"),
			("RPC_HAQQ", "https://haqq.example"),
			("PRIVATE_KEY", TEST_KEY),
		]);
		let config = Config::from_env_map(&env).unwrap();

		assert_eq!(
			config.network_names(),
			vec!["bscTestnet", "hadera", "haqq-testedge2"]
		);
		for profile in config.networks.values() {
			assert!(profile.url.is_some());
			assert_eq!(profile.accounts.len(), 1);
			assert_eq!(profile.accounts[0].expose_secret(), TEST_KEY);
		}
		assert_eq!(
			config.network("bscTestnet").unwrap().url.as_deref(),
			Some("https://bsc.example")
		);
		assert_eq!(config.network("hadera").unwrap().name, "hadera");
	}

	#[test]
	fn test_missing_private_key_yields_no_signers() {
		let env = vars(&[("RPC_BNB", "https://bsc.example")]);
		let config = Config::from_env_map(&env).unwrap();

		for profile in config.networks.values() {
			assert!(profile.accounts.is_empty());
			assert!(!profile.has_signer());
		}
	}

	#[test]
	fn test_empty_private_key_yields_no_signers() {
		let env = vars(&[("PRIVATE_KEY", "")]);
		let config = Config::from_env_map(&env).unwrap();
		assert!(config.networks.values().all(|p| p.accounts.is_empty()));
	}

	#[test]
	fn test_missing_rpc_url_is_none() {
		let config = Config::from_env_map(&HashMap::new()).unwrap();
		assert!(config.network("hadera").unwrap().url.is_none());
	}

	#[test]
	fn test_builtin_explorer_settings() {
		let config = Config::from_env_map(&HashMap::new()).unwrap();
		let settings = config.explorer_settings();

		assert_eq!(settings.len(), 1);
		let haqq = &settings["haqq-testedge2"];
		assert_eq!(haqq.api_key.as_deref(), Some("empty"));
		assert_eq!(haqq.chain_id, Some(54211));
		assert_eq!(
			haqq.api_url.as_deref(),
			Some("https://explorer.testedge2.haqq.network/api")
		);
		assert_eq!(
			haqq.address_url("0xabc").as_deref(),
			Some("https://explorer.testedge2.haqq.network/address/0xabc")
		);
		assert_eq!(config.chain_id("haqq-testedge2"), Some(54211));
		assert_eq!(config.chain_id("bscTestnet"), None);
		assert!(config.explorer_for("bscTestnet").is_none());
	}

	#[test]
	fn test_builtin_deployment_plan() {
		let config = Config::from_env_map(&HashMap::new()).unwrap();
		let plan = &config.deploy.contracts;

		let names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(
			names,
			vec![
				"SpheraNFTCollection",
				"NFTMarketplace",
				"SpheraToken",
				"SpheraPoints"
			]
		);
		let labels: Vec<&str> = plan.iter().map(|c| c.display_label()).collect();
		assert_eq!(
			labels,
			vec!["SpheraNFT", "SpheraMarketplace", "SpheraToken", "SPoint"]
		);
		assert_eq!(
			plan[0].args,
			vec![ConstructorArg::from("Sphera"), ConstructorArg::from("SP")]
		);
		assert!(plan[1].args.is_empty());
		assert_eq!(
			plan[2].args[2],
			ConstructorArg::Text("100000000000000000000000".to_string())
		);
		assert_eq!(config.deploy.artifacts_dir, PathBuf::from("artifacts"));
		assert_eq!(
			config.deploy.confirmation_timeout(),
			Some(Duration::from_secs(300))
		);
	}

	#[test]
	fn test_zero_timeout_is_unbounded() {
		let config_str = r#"
[compiler]
version = "0.8.20"

[deploy]
confirmation_timeout_seconds = 0

[[deploy.contracts]]
name = "Counter"
args = [1, true]
"#;
		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.deploy.confirmation_timeout(), None);
		assert_eq!(config.compiler.evm_version, EvmVersion::Cancun);
		assert!(!config.compiler.optimizer.enabled);
		assert_eq!(
			config.deploy.contracts[0].args,
			vec![ConstructorArg::Integer(1), ConstructorArg::Bool(true)]
		);
		assert_eq!(config.deploy.contracts[0].display_label(), "Counter");
	}

	#[test]
	fn test_invalid_compiler_version_rejected() {
		let config_str = r#"
[compiler]
version = "latest"

[[deploy.contracts]]
name = "Counter"
"#;
		let result: Result<Config, _> = config_str.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_unknown_evm_version_rejected() {
		let config_str = r#"
[compiler]
version = "0.8.28"
evm_version = "frontier"

[[deploy.contracts]]
name = "Counter"
"#;
		let result: Result<Config, _> = config_str.parse();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_empty_plan_rejected() {
		let config_str = r#"
[compiler]
version = "0.8.28"

[deploy]
"#;
		let result: Result<Config, _> = config_str.parse();
		assert!(result.unwrap_err().to_string().contains("at least one contract"));
	}

	#[test]
	fn test_custom_chain_for_unknown_network_rejected() {
		let config_str = r#"
[compiler]
version = "0.8.28"

[[explorer.custom_chains]]
network = "nowhere"
chain_id = 1
api_url = "https://api.example"
browser_url = "https://example"

[[deploy.contracts]]
name = "Counter"
"#;
		let result: Result<Config, _> = config_str.parse();
		assert!(result.unwrap_err().to_string().contains("nowhere"));
	}

	#[test]
	fn test_conflicting_chain_ids_rejected() {
		let config_str = r#"
[compiler]
version = "0.8.28"

[networks.local]
url = "http://localhost:8545"
chain_id = 31337

[[explorer.custom_chains]]
network = "local"
chain_id = 1
api_url = "https://api.example"
browser_url = "https://example"

[[deploy.contracts]]
name = "Counter"
"#;
		let result: Result<Config, _> = config_str.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[tokio::test]
	async fn test_from_file() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("sphera.toml");
		std::fs::write(
			&path,
			r#"
[compiler]
version = "0.8.28"

[networks.local]
url = "http://127.0.0.1:8545"
accounts = ["0x01", "", "  "]

[[deploy.contracts]]
name = "Counter"
"#,
		)
		.unwrap();

		let config = Config::from_file(&path).await.unwrap();
		let local = config.network("local").unwrap();
		assert_eq!(local.accounts.len(), 1);
		assert_eq!(local.url.as_deref(), Some("http://127.0.0.1:8545"));
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let result = Config::from_file(Path::new("/definitely/not/here.toml")).await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
