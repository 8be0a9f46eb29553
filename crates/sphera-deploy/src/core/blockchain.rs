//! Blockchain connection and deployment transaction handling
//!
//! This module connects to a configured network with its signing keys and
//! exposes the two operations a deployment needs: submit a contract
//! creation transaction and wait for its receipt. The orchestrator talks to
//! it through the [`DeploymentBackend`] trait.

use crate::types::{
	deployment::DeploymentReceipt,
	error::{Error, Result},
};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::{DynProvider, PendingTransactionConfig, Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use sphera_config::NetworkProfile;
use tracing::{debug, info};

/// Operations the deployment orchestrator needs from a network
#[async_trait]
pub trait DeploymentBackend: Send + Sync {
	/// Address deployments are sent from
	fn deployer(&self) -> Address;

	/// Signs and submits a contract creation transaction carrying `code`
	///
	/// Returns the transaction hash once the node has accepted it.
	async fn submit(&self, code: Bytes) -> Result<B256>;

	/// Waits until the transaction has `confirmations` blocks and returns
	/// its receipt
	///
	/// Implementations may wait indefinitely; the caller bounds the wait.
	async fn wait_for_receipt(&self, hash: B256, confirmations: u64) -> Result<DeploymentReceipt>;
}

/// Connected network with the deployer wallet attached
#[derive(Clone)]
pub struct Provider {
	inner: DynProvider,
	network: String,
	chain_id: u64,
	deployer: Address,
}

impl std::fmt::Debug for Provider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Provider")
			.field("network", &self.network)
			.field("chain_id", &self.chain_id)
			.field("deployer", &self.deployer)
			.field("inner", &"<dyn AlloyProvider>")
			.finish()
	}
}

impl Provider {
	/// Connects to a network profile
	///
	/// The first signing key becomes the deployer; any further keys are
	/// registered with the wallet. When `expected_chain_id` is given, the
	/// node's chain id must match it.
	///
	/// # Errors
	/// Returns `MissingRpcUrl` or `NoSigner` when the profile lacks an
	/// endpoint or key, `InvalidPrivateKey` for a malformed key, `RpcError`
	/// when the endpoint is invalid or unreachable, and `ChainMismatch` when
	/// the node serves a different chain.
	pub async fn connect(profile: &NetworkProfile, expected_chain_id: Option<u64>) -> Result<Self> {
		let rpc_url = profile
			.url
			.as_deref()
			.ok_or_else(|| Error::MissingRpcUrl(profile.name.clone()))?;

		let mut signers = Vec::with_capacity(profile.accounts.len());
		for key in &profile.accounts {
			let signer = key
				.expose_secret()
				.trim()
				.parse::<PrivateKeySigner>()
				.map_err(|_| Error::InvalidPrivateKey(profile.name.clone()))?;
			signers.push(signer);
		}
		let mut signers = signers.into_iter();
		let deployer_signer = signers
			.next()
			.ok_or_else(|| Error::NoSigner(profile.name.clone()))?;
		let deployer = deployer_signer.address();

		let mut wallet = EthereumWallet::from(deployer_signer);
		for signer in signers {
			wallet.register_signer(signer);
		}

		let url = rpc_url
			.parse()
			.map_err(|e| Error::RpcError(format!("Invalid RPC URL for {}: {}", profile.name, e)))?;

		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

		let chain_id = provider
			.get_chain_id()
			.await
			.map_err(|e| Error::RpcError(format!("Failed to connect to {}: {}", profile.name, e)))?;
		check_chain_id(&profile.name, expected_chain_id, chain_id)?;

		info!(
			network = %profile.name,
			chain_id = chain_id,
			deployer = %deployer,
			"Connected to network"
		);

		Ok(Self {
			inner: provider.erased(),
			network: profile.name.clone(),
			chain_id,
			deployer,
		})
	}

	/// Name of the connected network
	pub fn network(&self) -> &str {
		&self.network
	}

	/// Chain id reported by the node
	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}
}

#[async_trait]
impl DeploymentBackend for Provider {
	fn deployer(&self) -> Address {
		self.deployer
	}

	async fn submit(&self, code: Bytes) -> Result<B256> {
		let tx = TransactionRequest::default()
			.with_from(self.deployer)
			.with_deploy_code(code);

		debug!(
			network = %self.network,
			data_len = tx.input.input().map(|d| d.len()).unwrap_or(0),
			"Sending deployment transaction"
		);

		let pending = self
			.inner
			.send_transaction(tx)
			.await
			.map_err(|e| Error::SubmissionFailed(e.to_string()))?;

		Ok(*pending.tx_hash())
	}

	async fn wait_for_receipt(&self, hash: B256, confirmations: u64) -> Result<DeploymentReceipt> {
		let config = PendingTransactionConfig::new(hash).with_required_confirmations(confirmations);

		let confirmed = self
			.inner
			.watch_pending_transaction(config)
			.await
			.map_err(|e| Error::ConfirmationFailed(format!("Transaction watch failed: {}", e)))?
			.await
			.map_err(|e| Error::ConfirmationFailed(format!("Failed to confirm {}: {}", hash, e)))?;

		let receipt = self
			.inner
			.get_transaction_receipt(confirmed)
			.await
			.map_err(|e| Error::ConfirmationFailed(format!("Failed to get receipt: {}", e)))?
			.ok_or_else(|| Error::ConfirmationFailed(format!("No receipt for {}", hash)))?;

		Ok(DeploymentReceipt {
			tx_hash: receipt.transaction_hash,
			success: receipt.status(),
			contract_address: receipt.contract_address,
			block_number: receipt.block_number,
			gas_used: receipt.gas_used,
		})
	}
}

/// Compares the node's chain id against the configured one, if any
fn check_chain_id(network: &str, expected: Option<u64>, actual: u64) -> Result<()> {
	match expected {
		Some(expected) if expected != actual => Err(Error::ChainMismatch {
			network: network.to_string(),
			expected,
			actual,
		}),
		_ => Ok(()),
	}
}
