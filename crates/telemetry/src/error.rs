//! Telemetry error types.

/// A convenient type alias for `Result` with `E` = [`TelemetryError`].
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Failures while delivering an event.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TelemetryError {
	/// The request never reached the API.
	#[error("transport error: {0}")]
	Transport(String),
	/// The API answered with GraphQL errors.
	#[error("graphql errors: {}", .0.join("; "))]
	GraphQl(Vec<String>),
}
