//! Compiled contract artifacts and deployable factories
//!
//! Resolves a contract name to its compiled artifact and turns it into a
//! factory that can produce deployment payloads. Both the Hardhat layout
//! (`artifacts/contracts/**/<Name>.sol/<Name>.json` with `bytecode` as a hex
//! string) and the Foundry layout (`out/<Name>.sol/<Name>.json` with
//! `bytecode.object`) are understood.

use crate::types::error::{Error, Result};
use alloy_dyn_abi::{DynSolValue, Specifier};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde_json::Value;
use sphera_config::ConstructorArg;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories that never hold contract artifacts
const SKIPPED_DIRS: &[&str] = &["build-info", "cache"];

/// Read-only view over a directory of compiled artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	root: PathBuf,
}

impl ArtifactStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Resolves a contract name to a deployable factory
	///
	/// # Errors
	/// Returns `ArtifactNotFound` when no artifact exists for the name (for
	/// example when the sources were not compiled), or `InvalidArtifact` when
	/// the artifact cannot be deployed.
	pub fn resolve(&self, name: &str) -> Result<ContractFactory> {
		let path = self.find(name)?.ok_or_else(|| Error::ArtifactNotFound {
			name: name.to_string(),
			dir: self.root.clone(),
		})?;
		debug!(contract = name, path = %path.display(), "Resolved contract artifact");

		let content = std::fs::read_to_string(&path)?;
		let json: Value = serde_json::from_str(&content).map_err(|e| Error::InvalidArtifact {
			name: name.to_string(),
			reason: format!("invalid JSON in {}: {}", path.display(), e),
		})?;

		ContractFactory::from_artifact(name, &json)
	}

	/// Lists contract names that have an artifact, sorted and deduplicated
	pub fn list(&self) -> Result<Vec<String>> {
		let mut contracts = Vec::new();
		if self.root.exists() {
			collect_contracts(&self.root, &mut contracts)?;
		}
		contracts.sort();
		contracts.dedup();
		Ok(contracts)
	}

	fn find(&self, name: &str) -> Result<Option<PathBuf>> {
		let direct = self
			.root
			.join(format!("{}.sol", name))
			.join(format!("{}.json", name));
		if direct.is_file() {
			return Ok(Some(direct));
		}
		if !self.root.exists() {
			return Ok(None);
		}
		find_in(&self.root, name)
	}
}

fn is_skipped(dir: &Path) -> bool {
	dir.file_name()
		.and_then(|n| n.to_str())
		.map(|n| SKIPPED_DIRS.contains(&n))
		.unwrap_or(false)
}

fn find_in(dir: &Path, name: &str) -> Result<Option<PathBuf>> {
	let source_dir = format!("{}.sol", name);
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_dir() || is_skipped(&path) {
			continue;
		}
		if path.file_name().and_then(|n| n.to_str()) == Some(source_dir.as_str()) {
			let candidate = path.join(format!("{}.json", name));
			if candidate.is_file() {
				return Ok(Some(candidate));
			}
		}
		if let Some(found) = find_in(&path, name)? {
			return Ok(Some(found));
		}
	}
	Ok(None)
}

fn collect_contracts(dir: &Path, contracts: &mut Vec<String>) -> Result<()> {
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_dir() || is_skipped(&path) {
			continue;
		}
		let is_source_dir = path
			.file_name()
			.and_then(|n| n.to_str())
			.map(|n| n.ends_with(".sol"))
			.unwrap_or(false);
		if is_source_dir {
			for json_entry in std::fs::read_dir(&path)?.flatten() {
				if let Some(file_name) = json_entry.file_name().to_str() {
					if file_name.ends_with(".json") && !file_name.ends_with(".dbg.json") {
						let contract = file_name.trim_end_matches(".json");
						contracts.push(contract.to_string());
					}
				}
			}
		} else {
			collect_contracts(&path, contracts)?;
		}
	}
	Ok(())
}

/// A deployable contract: creation bytecode plus its ABI
#[derive(Debug, Clone)]
pub struct ContractFactory {
	name: String,
	abi: JsonAbi,
	bytecode: Bytes,
}

impl ContractFactory {
	/// Builds a factory from a parsed artifact
	pub fn from_artifact(name: &str, artifact: &Value) -> Result<Self> {
		let invalid = |reason: String| Error::InvalidArtifact {
			name: name.to_string(),
			reason,
		};

		let abi: JsonAbi = match artifact.get("abi") {
			Some(abi) => serde_json::from_value(abi.clone())
				.map_err(|e| invalid(format!("invalid ABI: {}", e)))?,
			None => return Err(invalid("no ABI found".to_string())),
		};

		let bytecode_hex = artifact
			.get("bytecode")
			.and_then(|b| b.as_str().or_else(|| b.get("object").and_then(|o| o.as_str())))
			.ok_or_else(|| invalid("no bytecode found".to_string()))?;

		let bytecode_hex = bytecode_hex.strip_prefix("0x").unwrap_or(bytecode_hex);
		if bytecode_hex.is_empty() {
			return Err(invalid(
				"empty bytecode, the contract is abstract or an interface".to_string(),
			));
		}
		if bytecode_hex.contains("__") {
			return Err(invalid("bytecode has unlinked library references".to_string()));
		}
		let bytecode = hex::decode(bytecode_hex)
			.map(Bytes::from)
			.map_err(|e| invalid(format!("invalid bytecode hex: {}", e)))?;

		Ok(Self {
			name: name.to_string(),
			abi,
			bytecode,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Creation bytecode without constructor arguments
	pub fn bytecode(&self) -> &Bytes {
		&self.bytecode
	}

	/// Number of constructor parameters
	pub fn constructor_arity(&self) -> usize {
		self.abi
			.constructor()
			.map(|c| c.inputs.len())
			.unwrap_or(0)
	}

	/// Builds the deployment payload: bytecode followed by the ABI-encoded
	/// constructor arguments
	///
	/// Each literal is coerced to the type of the matching constructor
	/// parameter.
	///
	/// # Errors
	/// Returns `InvalidArguments` when the argument count differs from the
	/// constructor's or a literal does not fit its parameter type.
	pub fn deploy_code(&self, args: &[ConstructorArg]) -> Result<Bytes> {
		let invalid = |reason: String| Error::InvalidArguments {
			name: self.name.clone(),
			reason,
		};

		let inputs = self
			.abi
			.constructor()
			.map(|c| c.inputs.as_slice())
			.unwrap_or(&[]);
		if inputs.len() != args.len() {
			return Err(invalid(format!(
				"expected {} arguments, got {}",
				inputs.len(),
				args.len()
			)));
		}

		let mut values = Vec::with_capacity(args.len());
		for (param, arg) in inputs.iter().zip(args) {
			let ty = param
				.resolve()
				.map_err(|e| invalid(format!("unsupported parameter type {}: {}", param.ty, e)))?;
			let literal = arg.to_string();
			let value = ty.coerce_str(&literal).map_err(|e| {
				invalid(format!(
					"cannot use '{}' as {} for parameter '{}': {}",
					literal, param.ty, param.name, e
				))
			})?;
			values.push(value);
		}

		let mut code = self.bytecode.to_vec();
		if !values.is_empty() {
			code.extend_from_slice(&DynSolValue::Tuple(values).abi_encode_params());
		}
		Ok(Bytes::from(code))
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use alloy_primitives::U256;
	use serde_json::json;
	use tempfile::TempDir;

	pub(crate) const TEST_BYTECODE: &str = "0x6080604052348015600e575f80fd5b50";

	/// Writes a Hardhat-style artifact whose constructor takes `inputs`
	pub(crate) fn write_artifact(root: &Path, name: &str, inputs: &[&str]) {
		let dir = root.join("contracts").join(format!("{}.sol", name));
		std::fs::create_dir_all(&dir).unwrap();
		let params: Vec<Value> = inputs
			.iter()
			.enumerate()
			.map(|(i, ty)| json!({ "name": format!("arg{}", i), "type": ty, "internalType": ty }))
			.collect();
		let artifact = json!({
			"_format": "hh-sol-artifact-1",
			"contractName": name,
			"abi": [
				{ "type": "constructor", "inputs": params, "stateMutability": "nonpayable" }
			],
			"bytecode": TEST_BYTECODE,
		});
		std::fs::write(
			dir.join(format!("{}.json", name)),
			serde_json::to_string(&artifact).unwrap(),
		)
		.unwrap();
	}

	#[test]
	fn test_resolve_hardhat_layout() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraPoints", &["string", "string"]);

		let store = ArtifactStore::new(temp_dir.path());
		let factory = store.resolve("SpheraPoints").unwrap();

		assert_eq!(factory.name(), "SpheraPoints");
		assert_eq!(factory.constructor_arity(), 2);
		assert_eq!(factory.bytecode().to_vec(), hex::decode(TEST_BYTECODE).unwrap());
	}

	#[test]
	fn test_resolve_foundry_layout() {
		let temp_dir = TempDir::new().unwrap();
		let dir = temp_dir.path().join("NFTMarketplace.sol");
		std::fs::create_dir_all(&dir).unwrap();
		let artifact = json!({
			"abi": [],
			"bytecode": { "object": TEST_BYTECODE },
		});
		std::fs::write(dir.join("NFTMarketplace.json"), artifact.to_string()).unwrap();

		let store = ArtifactStore::new(temp_dir.path());
		let factory = store.resolve("NFTMarketplace").unwrap();
		assert_eq!(factory.constructor_arity(), 0);
	}

	#[test]
	fn test_resolve_unknown_contract() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraToken", &[]);

		let store = ArtifactStore::new(temp_dir.path());
		let err = store.resolve("SpheraTokn").unwrap_err();
		assert!(matches!(err, Error::ArtifactNotFound { ref name, .. } if name == "SpheraTokn"));
	}

	#[test]
	fn test_resolve_in_missing_directory() {
		let store = ArtifactStore::new("/definitely/not/compiled");
		assert!(matches!(
			store.resolve("SpheraToken"),
			Err(Error::ArtifactNotFound { .. })
		));
		assert!(store.list().unwrap().is_empty());
	}

	#[test]
	fn test_empty_bytecode_rejected() {
		let artifact = json!({ "abi": [], "bytecode": "0x" });
		let err = ContractFactory::from_artifact("IERC721", &artifact).unwrap_err();
		assert!(matches!(err, Error::InvalidArtifact { .. }));
		assert!(err.to_string().contains("abstract"));
	}

	#[test]
	fn test_unlinked_bytecode_rejected() {
		let artifact = json!({
			"abi": [],
			"bytecode": "0x6080__$1234567890abcdef1234567890abcdef12$__6080",
		});
		let err = ContractFactory::from_artifact("Linked", &artifact).unwrap_err();
		assert!(err.to_string().contains("unlinked"));
	}

	#[test]
	fn test_list_skips_debug_files() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraToken", &[]);
		write_artifact(temp_dir.path(), "NFTMarketplace", &[]);
		let dbg = temp_dir.path().join("contracts/SpheraToken.sol/SpheraToken.dbg.json");
		std::fs::write(dbg, "{}").unwrap();
		std::fs::create_dir_all(temp_dir.path().join("build-info")).unwrap();

		let store = ArtifactStore::new(temp_dir.path());
		assert_eq!(
			store.list().unwrap(),
			vec!["NFTMarketplace".to_string(), "SpheraToken".to_string()]
		);
	}

	#[test]
	fn test_deploy_code_encodes_constructor_args() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraToken", &["string", "string", "uint256"]);
		let factory = ArtifactStore::new(temp_dir.path())
			.resolve("SpheraToken")
			.unwrap();

		let args = vec![
			ConstructorArg::from("SpheraToken"),
			ConstructorArg::from("SPT"),
			ConstructorArg::from("100000000000000000000000"),
		];
		let code = factory.deploy_code(&args).unwrap();

		let expected_args = DynSolValue::Tuple(vec![
			DynSolValue::String("SpheraToken".to_string()),
			DynSolValue::String("SPT".to_string()),
			DynSolValue::Uint(
				U256::from_str_radix("100000000000000000000000", 10).unwrap(),
				256,
			),
		])
		.abi_encode_params();

		let bytecode_len = factory.bytecode().len();
		assert_eq!(&code[..bytecode_len], factory.bytecode().as_ref());
		assert_eq!(&code[bytecode_len..], expected_args.as_slice());
	}

	#[test]
	fn test_deploy_code_without_constructor() {
		let factory = ContractFactory::from_artifact(
			"NFTMarketplace",
			&json!({ "abi": [], "bytecode": TEST_BYTECODE }),
		)
		.unwrap();
		assert_eq!(factory.deploy_code(&[]).unwrap(), *factory.bytecode());
	}

	#[test]
	fn test_deploy_code_argument_count_mismatch() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraNFTCollection", &["string", "string"]);
		let factory = ArtifactStore::new(temp_dir.path())
			.resolve("SpheraNFTCollection")
			.unwrap();

		let err = factory.deploy_code(&[ConstructorArg::from("Sphera")]).unwrap_err();
		assert!(matches!(err, Error::InvalidArguments { .. }));
		assert!(err.to_string().contains("expected 2 arguments, got 1"));
	}

	#[test]
	fn test_deploy_code_type_mismatch() {
		let temp_dir = TempDir::new().unwrap();
		write_artifact(temp_dir.path(), "SpheraToken", &["uint256"]);
		let factory = ArtifactStore::new(temp_dir.path())
			.resolve("SpheraToken")
			.unwrap();

		let err = factory
			.deploy_code(&[ConstructorArg::from("one hundred")])
			.unwrap_err();
		assert!(matches!(err, Error::InvalidArguments { .. }));
	}
}
