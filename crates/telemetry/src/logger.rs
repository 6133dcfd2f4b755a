//! Event logger.

use std::sync::Arc;

use serde_json::json;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{GraphQlClient, GraphQlRequest};
use crate::config::TelemetryConfig;
use crate::event::{Event, EventSource, UserEvent};

const LOG_EVENT_MUTATION: &str = "mutation logEvent($name: String!, $userCookieID: String!, $url: String!, $source: EventSource!) {
	logEvent(event: $name, userCookieID: $userCookieID, url: $url, source: $source) {
		alwaysNil
	}
}";

const LOG_USER_EVENT_MUTATION: &str = "mutation logUserEvent($event: UserEvent!, $userCookieID: String!) {
	logUserEvent(event: $event, userCookieID: $userCookieID) {
		alwaysNil
	}
}";

/// What happened to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
	/// Addressed to the public instance; nothing was sent.
	Skipped,
	/// The API accepted the event.
	Sent,
	/// The request failed; the error was swallowed.
	Failed,
}

/// Logs user events on a self-hosted instance.
///
/// Failures are expected when the instance predates an event kind and are only
/// reported at debug level.
#[derive(Clone)]
pub struct EventLogger {
	client: Arc<dyn GraphQlClient>,
	config: TelemetryConfig,
}

impl EventLogger {
	/// Creates a logger sending through `client`.
	pub fn new(client: Arc<dyn GraphQlClient>, config: TelemetryConfig) -> Self {
		Self { client, config }
	}

	/// Returns the active configuration.
	pub fn config(&self) -> &TelemetryConfig {
		&self.config
	}

	/// Logs a named event from a code host integration.
	pub async fn log_event(&self, event: &Event) -> LogOutcome {
		if self.config.is_public(&event.url) {
			return LogOutcome::Skipped;
		}
		let variables = json!({
			"name": event.name,
			"userCookieID": event.user_cookie_id,
			"url": event.url,
			"source": EventSource::CodeHostIntegration,
		});
		self.send(LOG_EVENT_MUTATION, variables).await
	}

	/// Logs a legacy user event.
	#[deprecated(note = "use `log_event`")]
	pub async fn log_user_event(&self, event: UserEvent, uid: &str, url: &str) -> LogOutcome {
		if self.config.is_public(url) {
			return LogOutcome::Skipped;
		}
		let variables = json!({
			"event": event,
			"userCookieID": uid,
		});
		self.send(LOG_USER_EVENT_MUTATION, variables).await
	}

	/// Fire-and-forget form of [`log_event`](Self::log_event) on the ambient tokio runtime.
	pub fn spawn_event(&self, event: Event) -> JoinHandle<LogOutcome> {
		let logger = self.clone();
		tokio::spawn(async move { logger.log_event(&event).await })
	}

	async fn send(&self, query: &'static str, variables: serde_json::Value) -> LogOutcome {
		let request = GraphQlRequest {
			query,
			variables,
			might_contain_private_info: false,
		};
		match self.client.request(request).await {
			Ok(_) => LogOutcome::Sent,
			Err(err) => {
				debug!(error = %err, "telemetry event dropped");
				LogOutcome::Failed
			}
		}
	}
}
