//! Event payloads.

use serde::{Deserialize, Serialize};

/// Legacy user action kinds accepted by `logUserEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserEvent {
	/// A page was viewed.
	PageView,
	/// A search was run.
	SearchQuery,
	/// Hover or definition lookup in the web app.
	CodeIntel,
	/// Reference lookup in the web app.
	CodeIntelRefs,
	/// Hover or definition lookup from a code host integration.
	CodeIntelIntegration,
	/// Reference lookup from a code host integration.
	CodeIntelIntegrationRefs,
}

/// Origin of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventSource {
	/// The web app.
	Web,
	/// A browser extension or native code host integration.
	CodeHostIntegration,
	/// The backend itself.
	Backend,
}

/// A named user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
	/// Event name, e.g. `"hover"`.
	pub name: String,
	/// Anonymous user identifier.
	#[serde(rename = "userCookieID")]
	pub user_cookie_id: String,
	/// Instance the user is talking to.
	pub url: String,
}

impl Event {
	/// Creates an event.
	pub fn new(name: impl Into<String>, user_cookie_id: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			user_cookie_id: user_cookie_id.into(),
			url: url.into(),
		}
	}
}
