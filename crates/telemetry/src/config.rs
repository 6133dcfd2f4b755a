//! Telemetry configuration.

use serde::{Deserialize, Serialize};

/// URL of the public instance; events addressed to it are never sent.
pub const DEFAULT_PUBLIC_URL: &str = "https://sourcegraph.com";

/// Telemetry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
	/// Instance URL for which logging is skipped.
	pub public_url: String,
}

impl Default for TelemetryConfig {
	fn default() -> Self {
		Self {
			public_url: DEFAULT_PUBLIC_URL.to_string(),
		}
	}
}

impl TelemetryConfig {
	/// Returns true if events for `url` must not leave the client.
	pub fn is_public(&self, url: &str) -> bool {
		url == self.public_url
	}
}
