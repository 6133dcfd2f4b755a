//! Error types for provider registration and evaluation.

use std::error::Error as StdError;
use std::fmt;

/// Returned by [`register_diagnostic_provider`] when the type identifier already
/// has an active registration. The registration set is left untouched.
///
/// [`register_diagnostic_provider`]: crate::DiagnosticRegistry::register_diagnostic_provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a diagnostic provider of type {kind:?} is already registered")]
pub struct DuplicateProviderError<K: fmt::Debug> {
	/// Type identifier that collided.
	pub kind: K,
}

/// Failure raised by a provider while computing diagnostics.
///
/// Never surfaces to feed subscribers; the registry absorbs it and treats the
/// provider's contribution as absent for the current round.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ProviderError(Box<dyn StdError + Send + Sync>);

impl ProviderError {
	/// Wraps any error value.
	pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
		Self(err.into())
	}

	/// Creates an error from a plain message.
	pub fn msg(message: impl Into<String>) -> Self {
		Self(message.into().into())
	}

	/// Returns the wrapped error.
	pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
		self.0
	}
}
