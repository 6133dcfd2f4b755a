//! Provider capability and the uniform shape of its output.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};

use crate::error::ProviderError;

/// One value produced by a provider: a diagnostic list, an absent (null) result, or a failure.
pub type ProviderItem<D> = Result<Option<Vec<D>>, ProviderError>;

/// Computes diagnostics for a scope.
///
/// Any `Fn(&S) -> DiagnosticSource<D>` closure is a provider.
pub trait DiagnosticProvider<S, D>: Send + Sync {
	/// Starts producing diagnostics for `scope`.
	///
	/// Called once per evaluation round; the returned source is dropped when the
	/// round is replaced or the subscriber goes away.
	fn provide_diagnostics(&self, scope: &S) -> DiagnosticSource<D>;
}

impl<S, D, F> DiagnosticProvider<S, D> for F
where
	F: Fn(&S) -> DiagnosticSource<D> + Send + Sync,
{
	fn provide_diagnostics(&self, scope: &S) -> DiagnosticSource<D> {
		self(scope)
	}
}

/// Output of a single provider invocation.
///
/// Synchronous lists, futures and ongoing streams are all carried as a stream of
/// [`ProviderItem`]s, so the registry consumes them uniformly.
pub struct DiagnosticSource<D> {
	items: BoxStream<'static, ProviderItem<D>>,
}

impl<D: Send + 'static> DiagnosticSource<D> {
	/// A list that is available immediately.
	pub fn ready(diagnostics: Vec<D>) -> Self {
		Self::from_items(stream::once(future::ready(Ok(Some(diagnostics)))))
	}

	/// An absent (null) result; the provider contributes nothing.
	pub fn absent() -> Self {
		Self::from_items(stream::once(future::ready(Ok(None))))
	}

	/// A provider that failed before producing anything.
	pub fn failed(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
		let err = ProviderError::new(err);
		Self::from_items(stream::once(future::ready(Err(err))))
	}

	/// A list that resolves later.
	pub fn future<Fut, E>(fut: Fut) -> Self
	where
		Fut: Future<Output = Result<Vec<D>, E>> + Send + 'static,
		E: Into<Box<dyn StdError + Send + Sync>>,
	{
		Self::from_items(stream::once(async move { fut.await.map(Some).map_err(ProviderError::new) }))
	}

	/// An ongoing sequence of lists; each one replaces the provider's previous contribution.
	pub fn stream<St, E>(st: St) -> Self
	where
		St: Stream<Item = Result<Vec<D>, E>> + Send + 'static,
		E: Into<Box<dyn StdError + Send + Sync>> + 'static,
	{
		Self::from_items(st.map_ok(Some).map_err(ProviderError::new))
	}

	/// A raw item stream, for providers that emit absent results between lists.
	pub fn from_items<St>(items: St) -> Self
	where
		St: Stream<Item = ProviderItem<D>> + Send + 'static,
	{
		Self { items: items.boxed() }
	}
}

impl<D: Send + 'static> From<Vec<D>> for DiagnosticSource<D> {
	fn from(diagnostics: Vec<D>) -> Self {
		Self::ready(diagnostics)
	}
}

impl<D> DiagnosticSource<D> {
	pub(crate) fn into_items(self) -> BoxStream<'static, ProviderItem<D>> {
		self.items
	}
}

impl<D> fmt::Debug for DiagnosticSource<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiagnosticSource").finish_non_exhaustive()
	}
}
