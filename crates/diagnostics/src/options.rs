//! Construction-time registry options.

use serde::{Deserialize, Serialize};

/// Options applied when a [`DiagnosticRegistry`](crate::DiagnosticRegistry) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
	/// Report provider failures through `tracing` instead of swallowing them silently.
	pub log_errors: bool,
}

impl Default for RegistryOptions {
	fn default() -> Self {
		Self { log_errors: true }
	}
}

impl RegistryOptions {
	/// Options that silently drop provider failures.
	pub const fn quiet() -> Self {
		Self { log_errors: false }
	}
}
