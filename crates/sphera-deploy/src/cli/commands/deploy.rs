//! Deploy command arguments

use clap::Args;
use std::path::PathBuf;

/// Deploys every contract of the plan, in order, to one network
#[derive(Args, Debug)]
pub struct DeployCommand {
	/// Network to deploy to (bscTestnet, hadera, haqq-testedge2)
	#[arg(long, short = 'n', required_unless_present = "list")]
	pub network: Option<String>,

	/// Directory holding compiled contract artifacts
	#[arg(long)]
	pub artifacts: Option<PathBuf>,

	/// Seconds to wait for each submission and confirmation, 0 to wait forever
	#[arg(long)]
	pub timeout: Option<u64>,

	/// Blocks required on top of each deployment transaction
	#[arg(long)]
	pub confirmations: Option<u64>,

	/// List the contracts found in the artifacts directory and exit
	#[arg(long)]
	pub list: bool,
}
