//! Secret string handling for signing keys.
//!
//! Signing keys are read from the environment and live for the whole run.
//! They are wiped from memory on drop and never rendered by `Debug` or
//! `Display`, so a configuration dump cannot leak them.

use serde::{Deserialize, Deserializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string whose contents are zeroized on drop and redacted when printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Exposes the secret value.
	///
	/// Callers must not log or persist the returned slice.
	pub fn expose_secret(&self) -> &str {
		self.0.as_str()
	}

	/// Returns true if the secret is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(Zeroizing::new(value.to_string()))
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(Zeroizing::new(value))
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(\"[REDACTED]\")")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::from)
	}
}
