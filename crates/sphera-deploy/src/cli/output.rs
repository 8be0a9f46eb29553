//! Terminal output for the deployment tool
//!
//! Everything the operator reads goes through [`Display`]. Lines are built
//! by small formatting functions so their layout can be checked without a
//! terminal; `Display` only adds color and picks stdout or stderr.

use colored::Colorize;
use sphera_config::ContractSpec;

/// Width of the key column in key-value listings
const KEY_WIDTH: usize = 22;

/// Terminal display utilities for formatted CLI output
pub struct Display;

impl Display {
	/// Prints a command title framed by rules
	pub fn header(text: &str) {
		let rule = "═".repeat(text.chars().count() + 4);
		println!("\n{}", rule.cyan());
		println!("  {}", text.bold().cyan());
		println!("{}", rule.cyan());
	}

	/// Prints the closing line of a successful run
	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message.green());
	}

	/// Prints an error line to stderr
	pub fn error(message: &str) {
		eprintln!("{} {}", "error:".red().bold(), message);
	}

	/// Prints a warning line to stderr, keeping stdout to results
	pub fn warning(message: &str) {
		eprintln!("{} {}", "warning:".yellow().bold(), message);
	}

	/// Prints an aligned key-value line
	pub fn kv(key: &str, value: &str) {
		let (key, value) = kv_parts(key, value);
		println!("  {} {}", key.bold(), value);
	}

	/// Prints a group title inside a command's output
	pub fn section(title: &str) {
		println!("\n{}", format!("» {}", title).bold());
	}

	/// Prints one entry of a contract name listing
	pub fn list_item(name: &str) {
		println!("  • {}", name);
	}

	/// Prints one numbered entry of the deployment plan
	pub fn plan_entry(position: usize, spec: &ContractSpec) {
		println!("  {}", plan_line(position, spec));
	}

	/// Prints the confirmed address of a contract
	///
	/// The wording is stable so the address can be grepped from logs.
	pub fn deployed(label: &str, address: &str) {
		println!("{} deployed to: {}", label.bold(), address.green());
	}
}

/// Pads the key to the listing's key column
fn kv_parts(key: &str, value: &str) -> (String, String) {
	(
		format!("{:<width$}", format!("{}:", key), width = KEY_WIDTH),
		value.to_string(),
	)
}

/// `N. Name(arg, ...) as Label`
fn plan_line(position: usize, spec: &ContractSpec) -> String {
	let args: Vec<String> = spec.args.iter().map(ToString::to_string).collect();
	format!(
		"{}. {}({}) as {}",
		position,
		spec.name,
		args.join(", "),
		spec.display_label()
	)
}
