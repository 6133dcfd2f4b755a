//! Collaborators a fresh cursor is resolved against.

use std::error::Error as StdError;

use async_trait::async_trait;

use crate::cursor::MonikerData;

/// Error type returned by store implementations.
pub type StoreError = Box<dyn StdError + Send + Sync>;

/// An uploaded index of one repository root at one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
	/// Upload identifier.
	pub id: i64,
	/// Directory of the repository the index was produced for, e.g. `sub1/`.
	pub root: String,
}

/// Dump metadata lookup.
#[async_trait]
pub trait DumpStore: Send + Sync {
	/// Returns the dump with `id`, or `None` when no such upload exists.
	async fn dump_by_id(&self, id: i64) -> Result<Option<Dump>, StoreError>;
}

/// Reads processed bundles.
#[async_trait]
pub trait BundleStore: Send + Sync {
	/// Monikers of every range of `dump_id` covering the position, one list per range.
	///
	/// `path` is relative to the dump root.
	async fn monikers_by_position(&self, dump_id: i64, path: &str, line: u32, character: u32) -> Result<Vec<Vec<MonikerData>>, StoreError>;
}
