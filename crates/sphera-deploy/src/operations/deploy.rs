//! Contract deployment operations
//!
//! Deploys the contracts of a plan one after another: every factory is
//! resolved and its payload encoded up front, then each contract is
//! submitted and confirmed before the next one starts. The first failure
//! aborts the run; contracts already deployed stay deployed.

use crate::{
	core::{artifacts::ArtifactStore, blockchain::DeploymentBackend},
	types::{
		deployment::{DeploymentRecord, DeploymentReport},
		error::{Error, Result},
	},
};
use alloy_primitives::Bytes;
use sphera_config::{ContractSpec, DeployConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Confirmation policy for each deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentOptions {
	/// Blocks required on top of the deployment transaction
	pub confirmations: u64,
	/// Upper bound on each submission and each confirmation wait; `None`
	/// waits forever
	pub timeout: Option<Duration>,
}

impl Default for DeploymentOptions {
	fn default() -> Self {
		Self {
			confirmations: 1,
			timeout: Some(Duration::from_secs(300)),
		}
	}
}

impl From<&DeployConfig> for DeploymentOptions {
	fn from(config: &DeployConfig) -> Self {
		Self {
			confirmations: config.confirmations,
			timeout: config.confirmation_timeout(),
		}
	}
}

/// A plan entry with its deployment payload ready to submit
#[derive(Debug, Clone)]
pub struct PreparedDeployment {
	pub spec: ContractSpec,
	/// Creation bytecode followed by the encoded constructor arguments
	pub code: Bytes,
}

/// Resolves every contract of a plan and encodes its constructor arguments
///
/// Touches only the artifact directory, never the network, so a misspelled
/// contract name or bad argument fails before anything is submitted.
pub fn prepare_plan(artifacts: &ArtifactStore, plan: &[ContractSpec]) -> Result<Vec<PreparedDeployment>> {
	plan.iter()
		.map(|spec| {
			let factory = artifacts.resolve(&spec.name)?;
			let code = factory.deploy_code(&spec.args)?;
			debug!(
				contract = %factory.name(),
				arity = factory.constructor_arity(),
				code_len = code.len(),
				"Prepared deployment"
			);
			Ok(PreparedDeployment {
				spec: spec.clone(),
				code,
			})
		})
		.collect()
}

/// Contract deployment operations handler
///
/// Drives a [`DeploymentBackend`] through an ordered plan with a bounded,
/// cancellable wait on each confirmation.
#[derive(Clone)]
pub struct ContractDeployer {
	backend: Arc<dyn DeploymentBackend>,
	options: DeploymentOptions,
	cancel: CancellationToken,
}

impl ContractDeployer {
	/// Creates a new deployer
	///
	/// # Arguments
	/// * `backend` - Connected network to deploy to
	/// * `options` - Confirmation policy
	pub fn new(backend: Arc<dyn DeploymentBackend>, options: DeploymentOptions) -> Self {
		Self {
			backend,
			options,
			cancel: CancellationToken::new(),
		}
	}

	/// Uses `token` to stop the run
	///
	/// Once cancelled, nothing further is submitted and a pending submission
	/// or confirmation wait is abandoned.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancel = token;
		self
	}

	/// Resolves and deploys a whole plan
	///
	/// See [`prepare_plan`] and [`ContractDeployer::execute`].
	pub async fn deploy_plan<F>(
		&self,
		network: &str,
		artifacts: &ArtifactStore,
		plan: &[ContractSpec],
		on_deployed: F,
	) -> Result<DeploymentReport>
	where
		F: FnMut(&DeploymentRecord),
	{
		let prepared = prepare_plan(artifacts, plan)?;
		self.execute(network, prepared, on_deployed).await
	}

	/// Deploys prepared contracts strictly in order
	///
	/// `on_deployed` runs for each contract as soon as it is confirmed, so a
	/// later failure still leaves the earlier addresses reported.
	///
	/// # Errors
	/// Returns the first submission or confirmation error; nothing after the
	/// failing contract is submitted.
	#[instrument(skip_all, fields(network = %network, contracts = prepared.len()))]
	pub async fn execute<F>(
		&self,
		network: &str,
		prepared: Vec<PreparedDeployment>,
		mut on_deployed: F,
	) -> Result<DeploymentReport>
	where
		F: FnMut(&DeploymentRecord),
	{
		info!(deployer = %self.backend.deployer(), "Starting contract deployment");

		let mut report = DeploymentReport {
			network: network.to_string(),
			records: Vec::with_capacity(prepared.len()),
		};

		for (index, deployment) in prepared.into_iter().enumerate() {
			debug!(step = index + 1, contract = %deployment.spec.name, "Deploying contract");
			let record = self.deploy_one(deployment).await?;
			on_deployed(&record);
			report.records.push(record);
		}

		info!("Contract deployment completed successfully");
		Ok(report)
	}

	async fn deploy_one(&self, deployment: PreparedDeployment) -> Result<DeploymentRecord> {
		let contract = deployment.spec.name.clone();
		if self.cancel.is_cancelled() {
			return Err(Error::Cancelled {
				contract,
				tx_hash: None,
			});
		}

		let hash = self
			.guarded(
				self.backend.submit(deployment.code),
				|timeout| Error::SubmissionTimeout {
					contract: contract.clone(),
					timeout,
				},
				|| Error::Cancelled {
					contract: contract.clone(),
					tx_hash: None,
				},
			)
			.await?;
		info!(contract = %contract, tx_hash = %hash, "Deployment transaction sent");

		let receipt = self
			.guarded(
				self.backend
					.wait_for_receipt(hash, self.options.confirmations),
				|timeout| Error::ConfirmationTimeout { hash, timeout },
				|| Error::Cancelled {
					contract: contract.clone(),
					tx_hash: Some(hash),
				},
			)
			.await?;
		if !receipt.success {
			return Err(Error::Reverted(hash));
		}
		let address = receipt
			.contract_address
			.ok_or(Error::MissingContractAddress(hash))?;

		Ok(DeploymentRecord {
			label: deployment.spec.display_label().to_string(),
			contract: deployment.spec.name,
			address,
			tx_hash: hash,
			block_number: receipt.block_number,
			gas_used: receipt.gas_used,
		})
	}

	/// Runs one network step under the timeout and the cancellation token
	///
	/// Cancellation wins over a step that is ready at the same time.
	async fn guarded<T, S, OnTimeout, OnCancel>(
		&self,
		step: S,
		timed_out: OnTimeout,
		cancelled: OnCancel,
	) -> Result<T>
	where
		S: Future<Output = Result<T>>,
		OnTimeout: FnOnce(Duration) -> Error,
		OnCancel: FnOnce() -> Error,
	{
		let bounded = async {
			match self.options.timeout {
				Some(timeout) => match tokio::time::timeout(timeout, step).await {
					Ok(result) => result,
					Err(_) => Err(timed_out(timeout)),
				},
				None => step.await,
			}
		};

		tokio::select! {
			biased;
			_ = self.cancel.cancelled() => Err(cancelled()),
			result = bounded => result,
		}
	}
}
