//! Diagnostic provider registry.
//!
//! Holds the current registration set and hands out merged diagnostic feeds
//! over it. The set lives in a [`watch`] channel as an immutable snapshot; every
//! mutation publishes a new slice, so subscribers always read a consistent list.

use std::{fmt, mem};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::debug;

use crate::error::DuplicateProviderError;
use crate::options::RegistryOptions;
use crate::provider::DiagnosticProvider;
use crate::stream::DiagnosticStream;

/// Structural equality gate for consecutive merged diagnostic lists.
pub type DiagnosticsEq<D> = Arc<dyn Fn(&[D], &[D]) -> bool + Send + Sync>;

/// Identity of one registration, unique for the lifetime of its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl RegistrationId {
	/// Returns the raw identifier.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for RegistrationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

pub(crate) struct Registration<K, S, D> {
	pub(crate) id: RegistrationId,
	pub(crate) kind: K,
	pub(crate) provider: Arc<dyn DiagnosticProvider<S, D>>,
}

impl<K: Clone, S, D> Clone for Registration<K, S, D> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			kind: self.kind.clone(),
			provider: Arc::clone(&self.provider),
		}
	}
}

/// Point-in-time view of the registration set.
pub(crate) type Snapshot<K, S, D> = Arc<[Registration<K, S, D>]>;

struct RegistryInner<K, S, D> {
	registrations: watch::Sender<Snapshot<K, S, D>>,
	next_id: AtomicU64,
	options: RegistryOptions,
	equality: DiagnosticsEq<D>,
}

/// Registry of diagnostic providers keyed by type identifier.
///
/// At most one provider may be registered per type identifier. Cloning the
/// registry yields another handle to the same registration set.
///
/// # Concurrency
///
/// The registration set is only ever replaced, never mutated in place. The
/// duplicate check and the append run inside one `send_if_modified` call, so
/// two racing registrations for the same type cannot both succeed.
pub struct DiagnosticRegistry<K, S, D> {
	inner: Arc<RegistryInner<K, S, D>>,
}

impl<K, S, D> Clone for DiagnosticRegistry<K, S, D> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<K, S, D> Default for DiagnosticRegistry<K, S, D>
where
	K: Clone + Eq + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: Clone + PartialEq + Send + 'static,
{
	fn default() -> Self {
		Self::new(RegistryOptions::default())
	}
}

impl<K, S, D> DiagnosticRegistry<K, S, D>
where
	K: Clone + Eq + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: Clone + PartialEq + Send + 'static,
{
	/// Creates an empty registry comparing merged lists element by element.
	pub fn new(options: RegistryOptions) -> Self {
		Self::with_equality(options, |a: &[D], b: &[D]| a == b)
	}
}

impl<K, S, D> DiagnosticRegistry<K, S, D>
where
	K: Clone + Eq + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: Clone + Send + 'static,
{
	/// Creates an empty registry with a custom equality gate for merged lists.
	///
	/// `equality` decides whether a freshly merged list repeats the last one
	/// delivered to a subscriber; repeats are suppressed.
	pub fn with_equality(options: RegistryOptions, equality: impl Fn(&[D], &[D]) -> bool + Send + Sync + 'static) -> Self {
		let (registrations, _) = watch::channel(Snapshot::from(Vec::new()));
		Self {
			inner: Arc::new(RegistryInner {
				registrations,
				next_id: AtomicU64::new(0),
				options,
				equality: Arc::new(equality),
			}),
		}
	}

	/// Returns the options this registry was created with.
	pub fn options(&self) -> RegistryOptions {
		self.inner.options
	}

	/// Registers `provider` under `kind`.
	///
	/// Fails without touching the registration set when `kind` already has an
	/// active registration. Active subscribers re-evaluate on success.
	pub fn register_diagnostic_provider<P>(&self, kind: K, provider: P) -> Result<ProviderRegistration, DuplicateProviderError<K>>
	where
		P: DiagnosticProvider<S, D> + 'static,
	{
		let id = RegistrationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
		let registration = Registration {
			id,
			kind: kind.clone(),
			provider: Arc::new(provider),
		};

		let mut duplicate = false;
		let mut previous = None;
		self.inner.registrations.send_if_modified(|current| {
			if current.iter().any(|r| r.kind == registration.kind) {
				duplicate = true;
				return false;
			}
			let mut next = current.to_vec();
			next.push(registration.clone());
			previous = Some(mem::replace(current, next.into()));
			true
		});
		// Released outside the watch lock.
		drop(previous);

		if duplicate {
			debug!(provider_type = ?kind, "rejected duplicate diagnostic provider");
			return Err(DuplicateProviderError { kind });
		}

		debug!(provider_type = ?kind, registration = %id, "diagnostic provider registered");
		let inner = Arc::downgrade(&self.inner);
		let registrations: Weak<dyn RegistrationSet> = inner;
		Ok(ProviderRegistration { id, registrations })
	}

	/// Observes the merged diagnostics of every provider, or only of the one registered as `kind`.
	///
	/// Each call starts an independent evaluation from the current registration
	/// set. Dropping the stream releases every provider stream it holds.
	pub fn observe_diagnostics(&self, scope: S, kind: Option<K>) -> DiagnosticStream<K, S, D> {
		DiagnosticStream::new(
			self.inner.registrations.subscribe(),
			scope,
			kind,
			self.inner.options,
			Arc::clone(&self.inner.equality),
		)
	}

	/// Number of active registrations.
	pub fn len(&self) -> usize {
		self.inner.registrations.borrow().len()
	}

	/// Returns true if no provider is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Type identifiers of the active registrations, in registration order.
	pub fn provider_types(&self) -> Vec<K> {
		self.inner.registrations.borrow().iter().map(|r| r.kind.clone()).collect()
	}
}

/// Identity-based access to a registration set, erased over its type parameters.
trait RegistrationSet: Send + Sync {
	/// Removes the registration with `id`, returning false if it was already gone.
	fn remove(&self, id: RegistrationId) -> bool;

	fn contains(&self, id: RegistrationId) -> bool;
}

impl<K, S, D> RegistrationSet for RegistryInner<K, S, D>
where
	K: Clone + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: 'static,
{
	fn remove(&self, id: RegistrationId) -> bool {
		// The removed provider and the old snapshot are dropped after the watch
		// lock is released; a provider's `Drop` may call back into the registry.
		let mut removed = None;
		self.registrations.send_if_modified(|current| {
			let Some(pos) = current.iter().position(|r| r.id == id) else {
				return false;
			};
			let mut next = current.to_vec();
			let registration = next.remove(pos);
			removed = Some((registration, mem::replace(current, next.into())));
			true
		});
		let Some((registration, _previous)) = removed else {
			return false;
		};
		debug!(provider_type = ?registration.kind, registration = %id, "diagnostic provider unregistered");
		true
	}

	fn contains(&self, id: RegistrationId) -> bool {
		self.registrations.borrow().iter().any(|r| r.id == id)
	}
}

/// Handle returned by a successful registration.
///
/// The registration stays active until [`unregister`](Self::unregister) is
/// called; dropping the handle does not remove it. The handle does not keep the
/// registry alive.
pub struct ProviderRegistration {
	id: RegistrationId,
	registrations: Weak<dyn RegistrationSet>,
}

impl ProviderRegistration {
	/// Identity of this registration.
	pub fn id(&self) -> RegistrationId {
		self.id
	}

	/// Removes exactly this registration.
	///
	/// Returns true if it was removed by this call. Calling it again, or after
	/// the registry is gone, is a no-op.
	pub fn unregister(&self) -> bool {
		self.registrations.upgrade().is_some_and(|set| set.remove(self.id))
	}

	/// Returns true while this registration is part of the registration set.
	pub fn is_registered(&self) -> bool {
		self.registrations.upgrade().is_some_and(|set| set.contains(self.id))
	}
}

impl fmt::Debug for ProviderRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProviderRegistration").field("id", &self.id).finish_non_exhaustive()
	}
}
