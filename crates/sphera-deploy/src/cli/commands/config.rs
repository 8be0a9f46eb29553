//! Configuration display command arguments

use clap::Args;

/// Shows the resolved configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
	/// Only show this network's settings
	#[arg(long)]
	pub network: Option<String>,
}
