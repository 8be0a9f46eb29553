//! Main binary entry point for the Sphera deployment CLI
//!
//! Loads `.env`, sets up logging, parses arguments and dispatches to the
//! command handlers. Every error ends up in one place and maps to exit
//! status 1.

use clap::Parser;
use sphera_config::{Config, NetworkProfile};
use sphera_deploy::{
	cli::{
		commands::{ConfigCommand, DeployCommand},
		output::Display,
		Cli, Commands,
	},
	core::logging,
	operations::{prepare_plan, ContractDeployer, DeploymentOptions},
	ArtifactStore, Error, Provider, Result,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	init_logging();

	let cli = Cli::parse();

	let (operation, result) = match cli.command {
		Commands::Deploy(cmd) => ("Deployment", handle_deploy(cli.config.as_deref(), cmd).await),
		Commands::Config(cmd) => ("Config", handle_config(cli.config.as_deref(), cmd).await),
		Commands::Networks => ("Networks", handle_networks(cli.config.as_deref()).await),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			logging::operation_error(operation, &err);
			ExitCode::FAILURE
		},
	}
}

/// Initialize structured logging
///
/// Verbosity follows `RUST_LOG`; the default keeps this tool at info and
/// everything else at warn.
fn init_logging() {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("sphera_deploy=info,sphera_config=info,warn"));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

/// Loads the configuration file if one was given, the built-in one otherwise
async fn load_config(path: Option<&Path>) -> Result<Config> {
	let config = match path {
		Some(path) => {
			info!(config_path = %path.display(), "Loading configuration file");
			Config::from_file(path).await?
		},
		None => Config::builtin()?,
	};
	Ok(config)
}

/// Handle deploy command
#[instrument(skip(cmd))]
async fn handle_deploy(config_path: Option<&Path>, cmd: DeployCommand) -> Result<()> {
	let started = Instant::now();
	let config = load_config(config_path).await?;

	let artifacts = ArtifactStore::new(
		cmd.artifacts
			.clone()
			.unwrap_or_else(|| config.deploy.artifacts_dir.clone()),
	);

	if cmd.list {
		Display::section(&format!("Contracts in {}", artifacts.root().display()));
		for name in artifacts.list()? {
			Display::list_item(&name);
		}
		return Ok(());
	}

	let network = cmd
		.network
		.as_deref()
		.ok_or_else(|| Error::Other(anyhow::anyhow!("--network is required")))?;
	let profile = config
		.network(network)
		.ok_or_else(|| Error::NetworkNotFound(network.to_string()))?;

	logging::operation_start("deploy", network);
	Display::header(&format!("Deploying to {}", network));

	// Every factory resolves before the first transaction goes out
	let prepared = prepare_plan(&artifacts, &config.deploy.contracts)?;

	let provider = Provider::connect(profile, config.chain_id(network)).await?;
	Display::kv("Network", provider.network());
	Display::kv("Chain id", &provider.chain_id().to_string());

	let options = DeploymentOptions {
		confirmations: cmd.confirmations.unwrap_or(config.deploy.confirmations),
		timeout: match cmd.timeout {
			Some(0) => None,
			Some(secs) => Some(Duration::from_secs(secs)),
			None => config.deploy.confirmation_timeout(),
		},
	};

	let cancel = CancellationToken::new();
	let interrupt = tokio::spawn({
		let cancel = cancel.clone();
		async move {
			if tokio::signal::ctrl_c().await.is_err() {
				return;
			}
			warn!("Interrupt received, stopping deployment");
			Display::warning("Interrupted; contracts already deployed stay deployed. Press Ctrl-C again to exit now");
			cancel.cancel();

			// A second interrupt terminates without waiting for the current step
			if tokio::signal::ctrl_c().await.is_ok() {
				std::process::exit(130);
			}
		}
	});

	let explorer = config.explorer_for(network);
	let deployer = ContractDeployer::new(Arc::new(provider), options).with_cancellation(cancel);
	Display::section("Contracts");
	let result = deployer
		.execute(network, prepared, |record| {
			let link = explorer
				.as_ref()
				.and_then(|settings| settings.address_url(&record.address.to_string()));
			logging::contract_deployed(record, link.as_deref());
		})
		.await;
	interrupt.abort();
	let report = result?;

	println!();
	Display::success("Deployment and registration complete!");
	info!(
		network = %report.network,
		contracts = report.records.len(),
		"Deployment finished"
	);
	logging::operation_complete("deploy", started.elapsed().as_millis() as u64);

	Ok(())
}

/// Handle config command
#[instrument(skip(cmd))]
async fn handle_config(config_path: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
	let config = load_config(config_path).await?;

	let profiles: Vec<&NetworkProfile> = match cmd.network.as_deref() {
		Some(name) => vec![config
			.network(name)
			.ok_or_else(|| Error::NetworkNotFound(name.to_string()))?],
		None => config.networks.values().collect(),
	};

	Display::header("Current Configuration");

	Display::section("Compiler");
	Display::kv("Solidity", &config.compiler.version);
	let optimizer = if config.compiler.optimizer.enabled {
		format!("enabled, {} runs", config.compiler.optimizer.runs)
	} else {
		"disabled".to_string()
	};
	Display::kv("Optimizer", &optimizer);
	Display::kv("EVM version", config.compiler.evm_version.as_str());

	for profile in profiles {
		Display::section(&format!("Network {}", profile.name));
		Display::kv("RPC URL", profile.url.as_deref().unwrap_or("<not set>"));
		Display::kv(
			"Accounts",
			&format!("{} key(s), values redacted", profile.accounts.len()),
		);
		if let Some(chain_id) = config.chain_id(&profile.name) {
			Display::kv("Chain id", &chain_id.to_string());
		}
		if let Some(explorer) = config.explorer_for(&profile.name) {
			if let Some(api_url) = &explorer.api_url {
				Display::kv("Explorer API", api_url);
			}
			if let Some(browser_url) = &explorer.browser_url {
				Display::kv("Explorer", browser_url);
			}
			Display::kv(
				"Explorer API key",
				if explorer.api_key.is_some() { "set" } else { "not set" },
			);
		}
	}

	if cmd.network.is_none() {
		let verified = config.explorer_settings();
		if !verified.is_empty() {
			Display::section("Verification");
			for (network, settings) in verified {
				let endpoint = settings.api_url.as_deref().unwrap_or("built-in");
				Display::kv(&network, endpoint);
			}
		}
	}

	Display::section("Deployment Plan");
	Display::kv("Artifacts", &config.deploy.artifacts_dir.display().to_string());
	Display::kv("Confirmations", &config.deploy.confirmations.to_string());
	let timeout = match config.deploy.confirmation_timeout() {
		Some(timeout) => format!("{}s", timeout.as_secs()),
		None => "none".to_string(),
	};
	Display::kv("Confirmation timeout", &timeout);
	for (index, spec) in config.deploy.contracts.iter().enumerate() {
		Display::plan_entry(index + 1, spec);
	}

	Ok(())
}

/// Handle networks command
#[instrument]
async fn handle_networks(config_path: Option<&Path>) -> Result<()> {
	let config = load_config(config_path).await?;

	Display::header("Networks");
	for name in config.network_names() {
		let Some(profile) = config.network(name) else {
			continue;
		};
		let chain = config
			.chain_id(name)
			.map(|id| format!("chain {}", id))
			.unwrap_or_else(|| "chain unknown".to_string());
		Display::kv(name, &chain);
		if profile.url.is_none() {
			Display::warning(&format!("{}: RPC URL not set", name));
		}
		if !profile.has_signer() {
			Display::warning(&format!("{}: no signing key", name));
		}
	}

	Ok(())
}
