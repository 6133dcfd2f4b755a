//! Merged diagnostics feed.
//!
//! A [`DiagnosticStream`] follows the registration set of its registry. Whenever
//! the set of registrations selected by its type filter changes, every selected
//! provider is invoked again and the previous round is dropped. Within a round,
//! the latest list of each provider is concatenated in registration order and
//! delivered unless it equals the previous delivery.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::watch;
use tracing::warn;

use crate::options::RegistryOptions;
use crate::provider::ProviderItem;
use crate::registry::{DiagnosticsEq, RegistrationId, Snapshot};

/// Contribution of one provider to the current round.
struct ProviderSlot<K, D> {
	kind: K,
	/// `None` once the provider stream finished or failed.
	items: Option<BoxStream<'static, ProviderItem<D>>>,
	latest: Option<Vec<D>>,
	produced: bool,
}

/// Live sequence of merged diagnostic lists, returned by
/// [`DiagnosticRegistry::observe_diagnostics`](crate::DiagnosticRegistry::observe_diagnostics).
///
/// Dropping the stream drops every provider stream of the current round.
pub struct DiagnosticStream<K, S, D> {
	scope: S,
	filter: Option<K>,
	updates: BoxStream<'static, Snapshot<K, S, D>>,
	updates_closed: bool,
	selection: Option<Vec<RegistrationId>>,
	round: Vec<ProviderSlot<K, D>>,
	last: Option<Vec<D>>,
	log_errors: bool,
	equality: DiagnosticsEq<D>,
}

// No field is ever pinned in place; provider streams are boxed.
impl<K, S, D> Unpin for DiagnosticStream<K, S, D> {}

impl<K, S, D> DiagnosticStream<K, S, D>
where
	K: Clone + Eq + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: Clone + Send + 'static,
{
	pub(crate) fn new(
		mut registrations: watch::Receiver<Snapshot<K, S, D>>,
		scope: S,
		filter: Option<K>,
		options: RegistryOptions,
		equality: DiagnosticsEq<D>,
	) -> Self {
		let initial = registrations.borrow_and_update().clone();
		let changes = stream::unfold(registrations, |mut rx| async move {
			rx.changed().await.ok()?;
			let snapshot = rx.borrow_and_update().clone();
			Some((snapshot, rx))
		});
		Self {
			scope,
			filter,
			updates: stream::once(future::ready(initial)).chain(changes).boxed(),
			updates_closed: false,
			selection: None,
			round: Vec::new(),
			last: None,
			log_errors: options.log_errors,
			equality,
		}
	}

	/// Provider type this stream is restricted to, if any.
	pub fn provider_type(&self) -> Option<&K> {
		self.filter.as_ref()
	}

	/// Number of providers taking part in the current round.
	pub fn provider_count(&self) -> usize {
		self.round.len()
	}

	/// Starts a new round if the selected registrations differ from the current one.
	fn select(&mut self, snapshot: &Snapshot<K, S, D>) -> bool {
		let selected: Vec<_> = snapshot
			.iter()
			.filter(|r| self.filter.as_ref().is_none_or(|kind| r.kind == *kind))
			.collect();
		let ids: Vec<_> = selected.iter().map(|r| r.id).collect();
		if self.selection.as_ref() == Some(&ids) {
			return false;
		}

		self.round = selected
			.into_iter()
			.map(|r| ProviderSlot {
				kind: r.kind.clone(),
				items: Some(r.provider.provide_diagnostics(&self.scope).into_items()),
				latest: None,
				produced: false,
			})
			.collect();
		self.selection = Some(ids);
		true
	}

	/// Drains every ready provider item of the current round.
	fn poll_round(&mut self, cx: &mut Context<'_>) -> bool {
		let mut changed = false;
		for slot in &mut self.round {
			while let Some(items) = slot.items.as_mut() {
				match items.poll_next_unpin(cx) {
					Poll::Ready(Some(Ok(list))) => {
						slot.latest = list;
						slot.produced = true;
						changed = true;
					}
					Poll::Ready(Some(Err(err))) => {
						if self.log_errors {
							warn!(provider_type = ?slot.kind, error = %err, "diagnostic provider failed");
						}
						slot.latest = None;
						slot.produced = true;
						slot.items = None;
						changed = true;
					}
					Poll::Ready(None) => slot.items = None,
					Poll::Pending => break,
				}
			}
		}
		changed
	}

	/// Concatenates the latest lists, or `None` while no provider of a non-empty round has produced anything.
	fn merge(&self) -> Option<Vec<D>> {
		if !self.round.is_empty() && !self.round.iter().any(|slot| slot.produced) {
			return None;
		}
		Some(self.round.iter().filter_map(|slot| slot.latest.as_deref()).flatten().cloned().collect())
	}
}

impl<K, S, D> Stream for DiagnosticStream<K, S, D>
where
	K: Clone + Eq + fmt::Debug + Send + Sync + 'static,
	S: 'static,
	D: Clone + Send + 'static,
{
	type Item = Vec<D>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();
		let mut changed = false;

		while !this.updates_closed {
			match this.updates.poll_next_unpin(cx) {
				Poll::Ready(Some(snapshot)) => changed |= this.select(&snapshot),
				Poll::Ready(None) => this.updates_closed = true,
				Poll::Pending => break,
			}
		}
		changed |= this.poll_round(cx);

		if changed && let Some(merged) = this.merge() {
			let repeated = this.last.as_deref().is_some_and(|last| (this.equality)(last, &merged));
			if !repeated {
				this.last = Some(merged.clone());
				return Poll::Ready(Some(merged));
			}
		}

		if this.updates_closed && this.round.iter().all(|slot| slot.items.is_none()) {
			return Poll::Ready(None);
		}
		Poll::Pending
	}
}

impl<K: fmt::Debug, S, D> fmt::Debug for DiagnosticStream<K, S, D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiagnosticStream")
			.field("filter", &self.filter)
			.field("providers", &self.round.len())
			.field("updates_closed", &self.updates_closed)
			.finish_non_exhaustive()
	}
}
