//! Command-line interface definitions and parsing
//!
//! Defines the top-level parser and subcommands with clap, plus the
//! terminal output helpers shared by the command handlers.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deploys the Sphera contract suite to an EVM network
#[derive(Parser, Debug)]
#[command(name = "sphera-deploy")]
#[command(about = "Deploy the Sphera NFT, marketplace, token and points contracts")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Configuration file replacing the built-in settings
	#[arg(long, global = true, env = "SPHERA_CONFIG")]
	pub config: Option<PathBuf>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Deploy the contract plan to a network
	Deploy(commands::DeployCommand),

	/// Show the resolved configuration with secrets redacted
	Config(commands::ConfigCommand),

	/// List configured networks
	Networks,
}
