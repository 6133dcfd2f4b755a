//! Registry of diagnostic providers with a live, merged diagnostics feed.
//!
//! Providers are registered under a type identifier (at most one per type) and
//! are asked for diagnostics for a caller-supplied scope. [`DiagnosticRegistry::observe_diagnostics`]
//! returns a [`DiagnosticStream`] that combines the latest list of every selected
//! provider and re-emits whenever the registration set or any provider output changes.
//!
//! * [`DiagnosticProvider`]: capability producing a [`DiagnosticSource`] for a scope
//! * [`DiagnosticSource`]: synchronous, asynchronous or streaming provider output
//! * [`DiagnosticRegistry`]: copy-on-write registration set behind a watch channel
//! * [`DiagnosticStream`]: switch-to-latest, combine-latest and dedup over providers
//!
//! Provider failures are contained: the failing provider contributes nothing for
//! the current round and the merged feed keeps running.

#![warn(missing_docs)]

pub mod error;
pub mod options;
pub mod provider;
pub mod registry;
pub mod stream;

pub use error::{DuplicateProviderError, ProviderError};
pub use options::RegistryOptions;
pub use provider::{DiagnosticProvider, DiagnosticSource, ProviderItem};
pub use registry::{DiagnosticRegistry, DiagnosticsEq, ProviderRegistration, RegistrationId};
pub use stream::DiagnosticStream;
